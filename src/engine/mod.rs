mod index;
mod parallel;
pub mod partition;
mod scan;
mod sequential;
mod window;

pub use self::index::next_state;
pub use self::parallel::{ParallelConfig, ParallelEngine};
pub use self::sequential::SequentialEngine;
use crate::Grid;
use crate::error::{LifeError, Result};

/// A Game of Life simulation that can be stepped one generation at a time
///
/// Implementations own their grid: [`Engine::current_grid`] only hands out a
/// shared borrow, and `step`/`restart` need `&mut self`, so a single engine
/// can never be advanced by two callers at once.
pub trait Engine {
    /// Computes the next generation and makes it current
    fn step(&mut self);
    /// Returns to the grid the engine was created with and resets the generation to 0
    fn restart(&mut self);
    fn current_grid(&self) -> &Grid;
    fn initial_grid(&self) -> &Grid;
    /// The number of steps taken since creation or the last restart
    fn generation(&self) -> u64;
}

/// The state shared by every engine implementation
#[derive(Debug, Clone)]
struct EngineState {
    current: Grid,
    initial: Grid,
    generation: u64,
}

impl EngineState {
    /// Captures `grid` as both the current and the restart grid
    fn new(grid: Grid) -> Result<Self> {
        if grid.is_empty() {
            return Err(LifeError::EmptyGrid);
        }
        Ok(Self {
            current: grid.clone(),
            initial: grid,
            generation: 0,
        })
    }

    /// Publishes a fully computed generation
    fn advance(&mut self, next: Grid) {
        debug_assert!(
            next.rows() == self.current.rows() && next.cols() == self.current.cols(),
            "next generation changed the grid dimensions"
        );
        self.current = next;
        self.generation += 1;
    }

    fn restart(&mut self) {
        self.current = self.initial.clone();
        self.generation = 0;
    }
}
