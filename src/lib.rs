//! Conway's Game of Life on a bounded grid, with a sequential and a row-parallel engine.

pub mod enc;
pub mod engine;
pub mod error;
pub mod grid;
pub mod simulate;
pub mod stats;

pub use enc::{GridEncoder, PlainText};
pub use engine::{Engine, ParallelConfig, ParallelEngine, SequentialEngine};
pub use error::{LifeError, Result};
pub use grid::Grid;
pub use simulate::{SimulateOptions, simulate, simulate_recorded};
