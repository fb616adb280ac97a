/// Single coordinate axis used for grid height, width, and positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Zero-based `(row, col)` coordinates, or `(height, width)` when used as a size.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    (a as CellCount) * (b as CellCount)
}

/// Cell at row-major position `index` in a grid of `size`.
pub const fn from_linear_index(index: CellCount, size: Coord2) -> Coord2 {
    let width = size.1 as CellCount;
    ((index / width) as Coord, (index % width) as Coord)
}

/// Row and column offsets of the 8-neighborhood, row by row.
static OFFSETS: [(i16, i16); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The up-to-8 grid-adjacent positions of `center` that lie inside a grid of `size`.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord2,
    offsets: core::slice::Iter<'static, (i16, i16)>,
}

impl NeighborIter {
    pub fn new(center: Coord2, size: Coord2) -> Self {
        Self {
            center,
            size,
            offsets: OFFSETS.iter(),
        }
    }

    fn shift(&self, (d_row, d_col): (i16, i16)) -> Option<Coord2> {
        let row = self.center.0.checked_add_signed(d_row)?;
        let col = self.center.1.checked_add_signed(d_col)?;
        (row < self.size.0 && col < self.size.1).then_some((row, col))
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = self.offsets.next() {
            if let Some(coords) = self.shift(offset) {
                return Some(coords);
            }
        }
        None
    }
}
