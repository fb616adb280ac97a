use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::*;

/// Uniform placement: shuffles every cell index and mines the first `config.mines` of them.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator<R> {
    rng: R,
}

impl<R: Rng> RandomMineGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomMineGenerator<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MineGenerator for RandomMineGenerator<R> {
    fn generate(mut self, config: GameConfig) -> Result<MineLayout> {
        config.validate()?;

        let total_cells = config.total_cells();
        let mut cell_ids: Vec<CellCount> = (0..total_cells).collect();
        cell_ids.shuffle(&mut self.rng);

        let layout = MineLayout::from_linear_indices(
            config.size(),
            cell_ids.into_iter().take(config.mines as usize),
        );
        log::debug!(
            "Placed {} mines on a {}x{} grid",
            layout.mine_count(),
            config.height,
            config.width
        );
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;

    use super::*;

    fn generate(seed: u64, height: Coord, width: Coord, mines: CellCount) -> MineLayout {
        let config = GameConfig::new(height, width, mines).unwrap();
        RandomMineGenerator::from_seed(seed).generate(config).unwrap()
    }

    #[test]
    fn places_exactly_the_requested_mines() {
        for seed in 0..32 {
            let layout = generate(seed, 9, 9, 10);

            assert_eq!(layout.mine_count(), 10);
            assert_eq!(layout.iter_mines().count(), 10);
            assert_eq!(layout.size(), (9, 9));
        }
    }

    #[test]
    fn same_seed_gives_same_layout() {
        assert_eq!(generate(7, 16, 30, 99), generate(7, 16, 30, 99));
    }

    #[test]
    fn full_and_empty_boards() {
        let full = generate(1, 4, 5, 20);
        assert_eq!(full.safe_cell_count(), 0);
        assert!(full.iter_mines().eq((0..4).flat_map(|r| (0..5).map(move |c| (r, c)))));

        let empty = generate(1, 4, 5, 0);
        assert_eq!(empty.mine_count(), 0);
    }

    #[test]
    fn every_cell_can_receive_a_mine() {
        let mut hits: Array2<u32> = Array2::default([3, 3]);
        for seed in 0..300 {
            for coords in generate(seed, 3, 3, 1).iter_mines() {
                hits[coords.to_nd_index()] += 1;
            }
        }

        assert_eq!(hits.sum(), 300);
        assert!(hits.iter().all(|&count| count > 0));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GameConfig {
            height: 2,
            width: 2,
            mines: 5,
        };

        assert!(matches!(
            RandomMineGenerator::from_seed(0).generate(config),
            Err(GameError::InvalidConfiguration(ConfigError::TooManyMines { .. }))
        ));
    }

    #[test]
    fn accepts_borrowed_rng() {
        let mut rng = SmallRng::seed_from_u64(3);
        let config = GameConfig::new(5, 5, 5).unwrap();

        let layout = RandomMineGenerator::new(&mut rng).generate(config).unwrap();

        assert_eq!(layout.mine_count(), 5);
    }
}
