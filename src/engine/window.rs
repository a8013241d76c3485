use super::index::{self, CENTER};
use crate::Grid;

/// A clamped 3x3 window over a [`Grid`]
///
/// Cells that would fall outside of the grid are treated as dead, so edge and
/// corner cells only ever see the neighbors that actually exist (no wraparound).
pub(super) struct Neighborhood<'a> {
    grid: &'a Grid,
}

impl<'a> Neighborhood<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// The 9-bit pattern of the window centered on `(row, col)`
    ///
    /// The top-left cell lands in the highest bit and the center in `1 << 4`,
    /// matching the layout of the rule index.
    pub fn pattern(&self, row: usize, col: usize) -> usize {
        let mut pattern = 0;
        for dr in 0..3 {
            for dc in 0..3 {
                pattern <<= 1;
                let (Some(r), Some(c)) = ((row + dr).checked_sub(1), (col + dc).checked_sub(1))
                else {
                    continue;
                };
                if self.grid.get(r, c) {
                    pattern |= 1;
                }
            }
        }
        pattern
    }

    #[inline]
    pub fn alive_neighbors(&self, row: usize, col: usize) -> u32 {
        (self.pattern(row, col) & !CENTER).count_ones()
    }

    #[inline]
    pub fn next_state(&self, row: usize, col: usize) -> bool {
        index::get_gol_index()[self.pattern(row, col)]
    }
}
