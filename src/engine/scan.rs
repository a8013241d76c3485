use super::index;
use crate::Grid;

/// A cursor over a single row of cells
///
/// [`RowCursor`] scans a row from left to right, keeping a buffer of whether
/// the last 3 columns it passed over are alive. Rows outside of the grid (and
/// columns past the end of the row) read as dead.
#[derive(Debug)]
struct RowCursor<'a> {
    row: Option<&'a [bool]>,
    col: usize,
    buffer: u8,
}

impl<'a> RowCursor<'a> {
    const MASK: u8 = 0b111;

    /// Creates a cursor that has already consumed column 0
    fn new(row: Option<&'a [bool]>) -> Self {
        let mut cursor = Self {
            row,
            col: 0,
            buffer: 0,
        };
        cursor.next();
        cursor
    }

    /// Shifts the next column into the buffer
    ///
    /// ## Returns
    /// The bit buffer of the last 3 columns, the newest in the lowest bit:
    /// ```text
    /// let buffer = cursor.next();
    /// let right = buffer & (1 << 0) != 0;  // the column just consumed
    /// let center = buffer & (1 << 1) != 0; // one behind it
    /// let left = buffer & (1 << 2) != 0;   // two behind it
    /// ```
    fn next(&mut self) -> u8 {
        let alive = self
            .row
            .and_then(|row| row.get(self.col))
            .copied()
            .unwrap_or(false);
        self.buffer = ((self.buffer << 1) | u8::from(alive)) & Self::MASK;
        self.col += 1;
        self.buffer
    }
}

/// Three [`RowCursor`]s moving in lockstep over the rows above, at and below a target row
pub(super) struct MultiRowCursor<'a> {
    above: RowCursor<'a>,
    center: RowCursor<'a>,
    below: RowCursor<'a>,
}

impl<'a> MultiRowCursor<'a> {
    pub fn new(grid: &'a Grid, row: usize) -> Self {
        let above = row.checked_sub(1).map(|r| grid.row(r));
        let below = (row + 1 < grid.rows()).then(|| grid.row(row + 1));
        Self {
            above: RowCursor::new(above),
            center: RowCursor::new(Some(grid.row(row))),
            below: RowCursor::new(below),
        }
    }

    /// Advances one column and returns the 9-bit neighborhood pattern of the
    /// cell that is now in the middle of the window
    #[inline]
    pub fn next(&mut self) -> usize {
        let above = self.above.next() as usize;
        let center = self.center.next() as usize;
        let below = self.below.next() as usize;
        (above << 6) | (center << 3) | below
    }
}

/// Computes the next generation of `row` from `grid`, writing it into `out`
///
/// `out` must be exactly one row wide. Only `grid` is read, so any number of
/// rows can be scanned at the same time into disjoint outputs.
pub(super) fn scan_row(grid: &Grid, row: usize, out: &mut [bool]) {
    debug_assert_eq!(out.len(), grid.cols(), "output is not one row wide");

    let index = index::get_gol_index();
    let mut cursor = MultiRowCursor::new(grid, row);
    for cell in out.iter_mut() {
        *cell = index[cursor.next()];
    }
}
