use super::window::Neighborhood;
use super::{Engine, EngineState};
use crate::error::Result;
use crate::Grid;
use rand::Rng;

/// Single-threaded reference engine
///
/// Every cell of the next generation is computed in one pass over a clamped
/// 3x3 window of the current grid.
#[derive(Debug, Clone)]
pub struct SequentialEngine {
    state: EngineState,
}

impl SequentialEngine {
    /// Creates an engine that starts from `grid`
    ///
    /// Fails with [`LifeError::EmptyGrid`](crate::LifeError::EmptyGrid) if the grid has no cells.
    pub fn new(grid: Grid) -> Result<Self> {
        Ok(Self {
            state: EngineState::new(grid)?,
        })
    }

    /// Creates an engine from a copy of `rows`
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        Self::new(Grid::from_rows(rows)?)
    }

    /// Creates an engine over a randomly filled `rows` by `cols` grid
    pub fn random<R: Rng + ?Sized>(rows: i32, cols: i32, rng: &mut R) -> Result<Self> {
        Self::new(Grid::random(rows, cols, rng)?)
    }
}

impl Engine for SequentialEngine {
    fn step(&mut self) {
        let current = &self.state.current;
        let cols = current.cols();
        let window = Neighborhood::new(current);

        let mut next = Grid::new(current.rows(), cols);
        for (i, cell) in next.as_mut_slice().iter_mut().enumerate() {
            *cell = window.next_state(i / cols, i % cols);
        }
        self.state.advance(next);
    }

    fn restart(&mut self) {
        self.state.restart();
    }

    #[inline]
    fn current_grid(&self) -> &Grid {
        &self.state.current
    }

    #[inline]
    fn initial_grid(&self) -> &Grid {
        &self.state.initial
    }

    #[inline]
    fn generation(&self) -> u64 {
        self.state.generation
    }
}
