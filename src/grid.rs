use crate::error::{LifeError, Result};
use rand::Rng;

/// A fixed-size, row-major grid of cells where `true` is alive
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates an all-dead grid
    ///
    /// Zero-sized grids are allowed here; the validating constructors
    /// ([`Grid::from_rows`], [`Grid::random`]) are the ones engines are built from.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Builds a grid from a list of rows, copying every cell
    ///
    /// Fails if there are no cells at all or if the rows differ in length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        if cols == 0 {
            return Err(LifeError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(LifeError::RaggedGrid {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Builds a `rows` by `cols` grid, asking `fill` for the state of every cell
    ///
    /// Cells are visited in row-major order. Fails if either dimension is not positive.
    pub fn filled<F>(rows: i32, cols: i32, mut fill: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> bool,
    {
        let (rows, cols) = checked_dimensions(rows, cols)?;
        let cells = (0..rows * cols).map(|i| fill(i / cols, i % cols)).collect();
        Ok(Self { rows, cols, cells })
    }

    /// Builds a grid where every cell is an independent fair coin flip
    pub fn random<R: Rng + ?Sized>(rows: i32, cols: i32, rng: &mut R) -> Result<Self> {
        Self::filled(rows, cols, |_, _| rng.random_bool(0.5))
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }
    /// True when the grid has no cells, e.g. `Grid::new(4, 0)`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The state of the cell at `(row, col)`
    ///
    /// Cells outside of the grid are reported as dead.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Sets the cell at `(row, col)`, panicking if it is out of bounds
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        self.cells[row * self.cols + col] = alive;
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[bool] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// All cells in row-major order
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }
}

/// Validates caller-supplied dimensions, converting them to sizes
fn checked_dimensions(rows: i32, cols: i32) -> Result<(usize, usize)> {
    if rows <= 0 || cols <= 0 {
        return Err(LifeError::InvalidDimension { rows, cols });
    }
    Ok((rows as usize, cols as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn from_rows_copies_cells_row_major() {
        let grid = Grid::from_rows(&[vec![true, false, false], vec![false, false, true]])
            .expect("valid rows");

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.as_slice(), &[true, false, false, false, false, true]);
        assert_eq!(grid.row(1), &[false, false, true]);
        assert_eq!(grid.alive_count(), 2);
    }

    #[test]
    fn from_rows_rejects_empty() {
        let no_rows: [Vec<bool>; 0] = [];
        assert!(matches!(Grid::from_rows(&no_rows), Err(LifeError::EmptyGrid)));
        assert!(matches!(
            Grid::from_rows(&[Vec::<bool>::new()]),
            Err(LifeError::EmptyGrid)
        ));
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let err = Grid::from_rows(&[vec![true, true], vec![true]]).unwrap_err();

        assert!(matches!(
            err,
            LifeError::RaggedGrid {
                row: 1,
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn random_rejects_non_positive_dimensions() {
        let mut rng = StdRng::seed_from_u64(7);

        assert!(matches!(
            Grid::random(0, 5, &mut rng),
            Err(LifeError::InvalidDimension { rows: 0, cols: 5 })
        ));
        assert!(matches!(
            Grid::random(5, -1, &mut rng),
            Err(LifeError::InvalidDimension { rows: 5, cols: -1 })
        ));
    }

    #[test]
    fn random_is_reproducible_with_seed() {
        let a = Grid::random(12, 9, &mut StdRng::seed_from_u64(42)).expect("grid");
        let b = Grid::random(12, 9, &mut StdRng::seed_from_u64(42)).expect("grid");

        assert_eq!(a, b);
        assert_eq!(a.rows(), 12);
        assert_eq!(a.cols(), 9);
    }

    #[test]
    fn filled_visits_row_major() {
        let grid = Grid::filled(2, 3, |row, col| row == 1 && col == 2).expect("grid");

        assert_eq!(grid.as_slice(), &[false, false, false, false, false, true]);
        assert!(matches!(
            Grid::filled(-2, 3, |_, _| true),
            Err(LifeError::InvalidDimension { rows: -2, cols: 3 })
        ));
    }

    #[test]
    fn get_outside_is_dead() {
        let mut grid = Grid::new(2, 2);
        grid.set(1, 1, true);

        assert!(grid.get(1, 1));
        assert!(!grid.get(2, 1));
        assert!(!grid.get(1, 2));
    }

    #[test]
    fn rows_iter_yields_each_row() {
        let grid = Grid::from_rows(&[[true, false], [false, true], [true, true]]).expect("grid");
        let rows: Vec<&[bool]> = grid.rows_iter().collect();

        assert_eq!(rows, vec![&[true, false][..], &[false, true], &[true, true]]);
    }
}
