use std::collections::VecDeque;
use std::time::Duration;

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No cell has been touched yet
    NotStarted,
    /// First open or flag happened, clock is running
    InProgress,
    /// Every safe cell is open
    Won,
    /// A mine was opened
    Lost,
}

impl GameStatus {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// A single game from the first move to a win or a loss.
///
/// Coordinates are zero-based `(row, col)` pairs. Moves made after the game has ended are
/// accepted and ignored, so frontends never have to check for game over before forwarding input.
#[derive(Clone, Debug)]
pub struct GameEngine<C = SystemClock> {
    size: Coord2,
    mine_count: CellCount,
    safe_total: CellCount,
    board: Array2<Cell>,
    opened_safe_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    triggered_mine: Option<Coord2>,
    clock: C,
}

impl GameEngine<SystemClock> {
    /// Builds a game with either a random layout drawn from the thread-local RNG or the given
    /// mine positions.
    pub fn new(height: Coord, width: Coord, mines: MineSpec) -> Result<Self> {
        match mines {
            MineSpec::Count(count) => {
                let config = GameConfig::new(height, width, count)?;
                Self::with_rng(config, &mut rand::rng())
            }
            MineSpec::Positions(positions) => {
                let layout = MineLayout::from_mine_coords((height, width), &positions)?;
                Ok(Self::from_layout(layout))
            }
        }
    }

    /// Random layout from a caller-provided RNG, so a seed fully determines the mines.
    pub fn with_rng<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        let layout = RandomMineGenerator::new(rng).generate(config)?;
        Ok(Self::from_layout(layout))
    }

    pub fn from_layout(mine_layout: MineLayout) -> Self {
        Self::from_layout_with_clock(mine_layout, SystemClock)
    }
}

impl<C: Clock> GameEngine<C> {
    pub fn from_layout_with_clock(mine_layout: MineLayout, clock: C) -> Self {
        let size = mine_layout.size();
        let mut board = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            Cell::new((row as Coord, col as Coord))
        });

        for mine in mine_layout.iter_mines() {
            board[mine.to_nd_index()].is_mine = true;
            for neighbor in NeighborIter::new(mine, size) {
                board[neighbor.to_nd_index()].adjacent_mines += 1;
            }
        }

        log::debug!(
            "New {}x{} game with {} mines",
            size.0,
            size.1,
            mine_layout.mine_count()
        );

        Self {
            size,
            mine_count: mine_layout.mine_count(),
            safe_total: mine_layout.safe_cell_count(),
            board,
            opened_safe_count: 0,
            flagged_count: 0,
            status: Default::default(),
            started_at: None,
            ended_at: None,
            triggered_mine: None,
            clock,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// `(height, width)`
    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn height(&self) -> Coord {
        self.size.0
    }

    pub fn width(&self) -> Coord {
        self.size.1
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_total(&self) -> CellCount {
        self.safe_total
    }

    /// Safe cells opened by the player. Cells forced open when a mine goes off are not counted,
    /// so this reaches [`Self::safe_total`] only on a win.
    pub fn opened_safe_count(&self) -> CellCount {
        self.opened_safe_count
    }

    /// Flags currently shown, i.e. on unopened cells.
    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines not yet accounted for by a flag, negative when over-flagged.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.mine_count) - i64::from(self.flagged_count)
    }

    /// The mine that ended a lost game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        self.cell_at(coords).map(|cell| cell.view())
    }

    /// Player-visible grid, one `Vec` per row.
    pub fn render_snapshot(&self) -> Vec<Vec<CellView>> {
        self.board
            .rows()
            .into_iter()
            .map(|row| row.iter().map(Cell::view).collect())
            .collect()
    }

    /// Same as [`Self::render_snapshot`] but as an array indexed by `[row, col]`.
    pub fn view_grid(&self) -> Array2<CellView> {
        self.board.map(Cell::view)
    }

    /// Time spent playing: zero before the first move, running while in progress, frozen once
    /// the game ends.
    pub fn elapsed(&self) -> Duration {
        match (self.status, self.started_at, self.ended_at) {
            (GameStatus::NotStarted, _, _) => Duration::ZERO,
            (GameStatus::InProgress, Some(started_at), _) => {
                self.clock.now().saturating_duration_since(started_at)
            }
            (GameStatus::Won | GameStatus::Lost, Some(started_at), Some(ended_at)) => {
                ended_at.saturating_duration_since(started_at)
            }
            _ => Duration::ZERO,
        }
    }

    /// [`Self::elapsed`] rounded to the nearest whole second.
    pub fn elapsed_secs(&self) -> u64 {
        round_secs(self.elapsed())
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        self.mark_started();

        if !matches!(self.status, GameStatus::InProgress) {
            return Ok(MarkOutcome::NoChange);
        }

        // opened cells may carry a flag too, it just never shows and is not counted
        let cell = &mut self.board[coords.to_nd_index()];
        cell.is_flagged = !cell.is_flagged;
        match (cell.is_opened, cell.is_flagged) {
            (true, _) => {}
            (false, true) => self.flagged_count += 1,
            (false, false) => self.flagged_count -= 1,
        }
        log::trace!("Flag at {:?} set to {}", coords, cell.is_flagged);

        Ok(MarkOutcome::Changed)
    }

    /// Opens a cell, cascading through zero cells. The outcome describes the board only: a
    /// flagged cell stays closed and gives `NoChange`. Flagging already starts the game, so a
    /// call that moves the game out of NotStarted always opens something.
    pub fn open(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.mark_started();

        if !matches!(self.status, GameStatus::InProgress) {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = self.board[coords.to_nd_index()];
        if cell.is_mine {
            self.detonate(coords);
            return Ok(RevealOutcome::HitMine);
        }
        if cell.is_opened {
            return Ok(RevealOutcome::NoChange);
        }

        let opened = self.cascade(coords);
        log::debug!("Open at {:?} revealed {} cells", coords, opened);

        if self.opened_safe_count == self.safe_total {
            self.end_game(GameStatus::Won);
            Ok(RevealOutcome::Won)
        } else if opened > 0 {
            Ok(RevealOutcome::Revealed)
        } else {
            Ok(RevealOutcome::NoChange)
        }
    }

    /// Breadth-first flood fill from `start`, which must be a safe cell. Zero cells expand to
    /// their neighbors, numbered cells form the boundary, flagged cells are never opened or
    /// expanded. Returns how many cells were opened.
    fn cascade(&mut self, start: Coord2) -> CellCount {
        let mut opened = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = self.board[visit_coords.to_nd_index()];
            if cell.is_flagged {
                log::trace!("Flag at {:?} blocks the flood", visit_coords);
                continue;
            }

            if !cell.is_opened {
                self.open_cell(visit_coords);
                opened += 1;
            }

            if cell.adjacent_mines > 0 {
                continue;
            }

            for neighbor in NeighborIter::new(visit_coords, self.size) {
                let neighbor_cell = self.board[neighbor.to_nd_index()];
                if neighbor_cell.is_opened || neighbor_cell.is_flagged {
                    continue;
                }
                self.open_cell(neighbor);
                opened += 1;
                to_visit.push_back(neighbor);
            }
        }

        opened
    }

    fn open_cell(&mut self, coords: Coord2) {
        let cell = &mut self.board[coords.to_nd_index()];
        cell.is_opened = true;
        if !cell.is_mine {
            self.opened_safe_count += 1;
        }
        log::trace!(
            "Opened cell at {:?}, mine count: {}",
            coords,
            cell.adjacent_mines
        );
    }

    /// Ends the game on a mine and opens the whole board. The safe-cell counter is left alone so
    /// it only ever reaches the total on a win.
    fn detonate(&mut self, coords: Coord2) {
        self.triggered_mine = Some(coords);
        for cell in self.board.iter_mut() {
            cell.is_opened = true;
        }
        self.flagged_count = 0;
        self.end_game(GameStatus::Lost);
    }

    /// Changes NotStarted to InProgress, recording the start time
    fn mark_started(&mut self) {
        if matches!(self.status, GameStatus::NotStarted) {
            let now = self.clock.now();
            log::debug!("Game started");
            self.started_at = Some(now);
            self.status = GameStatus::InProgress;
        }
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }

        self.status = status;
        self.ended_at = Some(self.clock.now());
        log::debug!("Game ended as {:?} after {:?}", status, self.elapsed());
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }
}
