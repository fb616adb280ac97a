use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Coordinates {0:?} are out of bounds")]
    OutOfBounds(Coord2),
}

/// Reasons a grid cannot be constructed.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Grid must have at least one row and one column")]
    EmptyGrid,
    #[error("Mine at {0:?} lies outside the grid")]
    MineOutOfBounds(Coord2),
    #[error("Mine at {0:?} listed more than once")]
    DuplicateMine(Coord2),
    #[error("Too many mines, requested {requested} but only {capacity} cells")]
    TooManyMines {
        requested: CellCount,
        capacity: CellCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
