use serde::{Deserialize, Serialize};

use crate::*;

/// One grid position as tracked by the engine.
///
/// Position, mine presence and adjacency count are fixed when the grid is built;
/// only the opened and flagged bits change during play.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    row: Coord,
    col: Coord,
    pub(crate) is_mine: bool,
    pub(crate) is_opened: bool,
    pub(crate) is_flagged: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub(crate) const fn new((row, col): Coord2) -> Self {
        Self {
            row,
            col,
            is_mine: false,
            is_opened: false,
            is_flagged: false,
            adjacent_mines: 0,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn row(&self) -> Coord {
        self.row
    }

    pub const fn col(&self) -> Coord {
        self.col
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_opened(&self) -> bool {
        self.is_opened
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// What a player is allowed to see of this cell.
    pub const fn view(&self) -> CellView {
        match (self.is_opened, self.is_mine, self.is_flagged) {
            (true, true, _) => CellView::Mine,
            (true, false, _) => CellView::Count(self.adjacent_mines),
            (false, _, true) => CellView::Flagged,
            (false, _, false) => CellView::Closed,
        }
    }
}

/// Player-visible glyph-state of a cell, the only form in which frontends observe the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    /// Opened cell holding a mine.
    Mine,
    /// Opened safe cell with its adjacent mine count, 0 being the empty marker.
    Count(u8),
    /// Unopened cell carrying a flag.
    Flagged,
    /// Unopened cell.
    Closed,
}

impl CellView {
    pub const fn is_opened(self) -> bool {
        matches!(self, Self::Mine | Self::Count(_))
    }

    /// Conventional single-character glyph for text frontends.
    pub const fn glyph(self) -> char {
        match self {
            Self::Mine => '*',
            Self::Count(0) => '.',
            Self::Count(count) if count <= 9 => (b'0' + count) as char,
            Self::Count(_) => '#',
            Self::Flagged => '?',
            Self::Closed => '-',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_prefers_opened_state_over_flag() {
        let mut cell = Cell::new((0, 0));
        cell.adjacent_mines = 2;
        cell.is_flagged = true;
        assert_eq!(cell.view(), CellView::Flagged);

        cell.is_opened = true;
        assert_eq!(cell.view(), CellView::Count(2));

        cell.is_mine = true;
        assert_eq!(cell.view(), CellView::Mine);
    }

    #[test]
    fn glyphs_match_text_convention() {
        assert_eq!(CellView::Mine.glyph(), '*');
        assert_eq!(CellView::Count(0).glyph(), '.');
        assert_eq!(CellView::Count(3).glyph(), '3');
        assert_eq!(CellView::Count(8).glyph(), '8');
        assert_eq!(CellView::Flagged.glyph(), '?');
        assert_eq!(CellView::Closed.glyph(), '-');
    }

    #[test]
    fn cell_view_serializes_as_tagged_variant() {
        let json = serde_json::to_string(&CellView::Count(4)).unwrap();

        assert_eq!(json, r#"{"Count":4}"#);
        assert_eq!(
            serde_json::from_str::<CellView>(r#""Flagged""#).unwrap(),
            CellView::Flagged
        );
    }
}
