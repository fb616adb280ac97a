use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod clock;
mod engine;
mod error;
mod generator;
mod types;

/// Dimensions and mine count of a randomly laid out game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub height: Coord,
    pub width: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub fn new(height: Coord, width: Coord, mines: CellCount) -> Result<Self> {
        let config = Self {
            height,
            width,
            mines,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::EmptyGrid.into());
        }

        let capacity = self.total_cells();
        if self.mines > capacity {
            return Err(ConfigError::TooManyMines {
                requested: self.mines,
                capacity,
            }
            .into());
        }

        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.height, self.width)
    }
}

/// How mines are chosen when constructing a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MineSpec {
    /// Uniformly random placement of this many mines.
    Count(CellCount),
    /// Exactly these zero-based `(row, col)` positions.
    Positions(Vec<Coord2>),
}

/// Where the mines are. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(ConfigError::EmptyGrid.into());
        }

        let capacity = mult(size.0, size.1);
        let requested = CellCount::try_from(mine_coords.len()).unwrap_or(CellCount::MAX);
        if requested > capacity {
            return Err(ConfigError::TooManyMines {
                requested,
                capacity,
            }
            .into());
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(ConfigError::MineOutOfBounds(coords).into());
            }
            let slot = &mut mine_mask[coords.to_nd_index()];
            if *slot {
                return Err(ConfigError::DuplicateMine(coords).into());
            }
            *slot = true;
        }

        Ok(Self {
            mine_mask,
            mine_count: requested,
        })
    }

    /// Builds a layout from row-major cell indices, as produced by the random generator.
    pub(crate) fn from_linear_indices(
        size: Coord2,
        indices: impl IntoIterator<Item = CellCount>,
    ) -> Self {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for index in indices {
            mine_mask[from_linear_index(index, size).to_nd_index()] = true;
        }
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();

        Self {
            mine_mask,
            mine_count: CellCount::try_from(mine_count).unwrap_or(CellCount::MAX),
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        // dimensions always come from a Coord2
        (rows as Coord, cols as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (height, width) = self.size();
        mult(height, width)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Mine positions in row-major order.
    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

/// Result of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

/// Result of an open, telling a frontend whether the board needs redrawing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Nothing was opened
    NoChange,
    /// At least one safe cell opened and the game goes on
    Revealed,
    /// A mine was opened, the game is lost
    HitMine,
    /// The last safe cell opened, the game is won
    Won,
}
