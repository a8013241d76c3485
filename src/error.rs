use std::io;

/// Errors raised while building engines, decoding grids or driving a simulation.
#[derive(Debug, thiserror::Error)]
pub enum LifeError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimension { rows: i32, cols: i32 },
    #[error("initial grid must contain at least one cell")]
    EmptyGrid,
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("generation count must be positive, got {0}")]
    InvalidGenerationCount(i32),
    #[error("alive and dead symbols must differ, both are {0:?}")]
    InvalidSymbols(char),
    #[error("line {line}: {reason}")]
    Decode { line: usize, reason: String },
    #[error("invalid arguments: {0}")]
    Args(#[from] getopts::Fail),
    #[error("invalid value for --{name}: {value:?}")]
    InvalidOption { name: &'static str, value: String },
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, LifeError>;
