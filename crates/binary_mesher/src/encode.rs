//! Column encoding.
//!
//! Packs the occupancy grid into one [`Sequence`] per (axis, row): bit `i` of
//! the word is set when the cell at coordinate `i` along that axis is solid.
//! Three families of `D × D` words are produced, one per axis.

use crate::core::{OccupancyGrid, Sequence, AXIS_X, AXIS_Y, AXIS_Z};

/// Occupancy packed along each axis.
///
/// For axis `a` the row is addressed by the two other coordinates in cyclic
/// order, `(c[(a + 1) % 3], c[(a + 2) % 3])`, and the bit is `c[a]`:
/// - X columns: row `(y, z)`, bit `x`
/// - Y columns: row `(z, x)`, bit `y`
/// - Z columns: row `(x, y)`, bit `z`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisColumns {
    diameter: usize,
    columns: [Vec<Sequence>; 3],
}

impl AxisColumns {
    /// All-zero columns for a chunk of the given diameter.
    pub fn new(diameter: usize) -> Self {
        let rows = diameter * diameter;
        Self {
            diameter,
            columns: [vec![0; rows], vec![0; rows], vec![0; rows]],
        }
    }

    #[inline]
    pub fn diameter(&self) -> usize {
        self.diameter
    }

    /// Word for `axis` at row `(first, second)`.
    #[inline]
    pub fn get(&self, axis: usize, first: usize, second: usize) -> Sequence {
        self.columns[axis][first * self.diameter + second]
    }

    #[inline]
    fn set_bit(&mut self, axis: usize, first: usize, second: usize, bit: usize) {
        self.columns[axis][first * self.diameter + second] |= 1 << bit;
    }

    /// All words of one axis family, row-major by `(first, second)`.
    pub fn axis(&self, axis: usize) -> &[Sequence] {
        &self.columns[axis]
    }
}

/// Encode a grid into per-axis column words.
///
/// The grid's diameter was validated on construction, so every coordinate
/// fits in a [`Sequence`].
pub fn encode_columns(grid: &OccupancyGrid) -> AxisColumns {
    let mut columns = AxisColumns::new(grid.diameter());

    for [x, y, z] in grid.solid_cells() {
        columns.set_bit(AXIS_X, y, z, x);
        columns.set_bit(AXIS_Y, z, x, y);
        columns.set_bit(AXIS_Z, x, y, z);
    }

    columns
}
