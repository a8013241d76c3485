use super::{Engine, EngineState, partition, scan};
use crate::error::Result;
use crate::Grid;
use rand::Rng;

/// Configuration for a [`ParallelEngine`]
///
/// Use `ParallelConfig::default()` to size everything from the machine, or
/// set individual knobs via the builder methods.
#[derive(Clone, Debug, Default)]
pub struct ParallelConfig {
    /// Number of threads in the engine's pool.
    /// `None` lets rayon pick (available parallelism or `RAYON_NUM_THREADS`).
    pub thread_count: Option<usize>,
    /// Rows per task. `None` uses [`partition::chunk_rows`].
    pub chunk_rows: Option<usize>,
}

impl ParallelConfig {
    pub fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n.max(1));
        self
    }

    pub fn chunk_rows(mut self, n: usize) -> Self {
        self.chunk_rows = Some(n.max(1));
        self
    }
}

/// Row-partitioned engine running on its own rayon thread pool
///
/// Each generation the rows are cut into contiguous chunks. Every chunk reads
/// the shared previous grid and writes only its own slice of the next one, and
/// `step` returns after all chunks have joined.
#[derive(Debug)]
pub struct ParallelEngine {
    state: EngineState,
    pool: rayon::ThreadPool,
    chunk_rows: Option<usize>,
}

impl ParallelEngine {
    pub fn new(grid: Grid) -> Result<Self> {
        Self::with_config(grid, ParallelConfig::default())
    }

    /// Fails on a grid without cells or if the thread pool cannot be built
    pub fn with_config(grid: Grid, config: ParallelConfig) -> Result<Self> {
        let state = EngineState::new(grid)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count.unwrap_or(0))
            .thread_name(|i| format!("lifebench-worker-{i}"))
            .build()?;

        Ok(Self {
            state,
            pool,
            chunk_rows: config.chunk_rows,
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

    #[inline]
    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// The number of rows each task gets for the current grid
    pub fn chunk_rows(&self) -> usize {
        self.chunk_rows.unwrap_or_else(|| {
            partition::chunk_rows(self.state.current.rows(), self.thread_count())
        })
    }
}

impl Engine for ParallelEngine {
    fn step(&mut self) {
        let chunk_rows = self.chunk_rows();
        let current = &self.state.current;
        let cols = current.cols();

        let mut next = Grid::new(current.rows(), cols);
        let out = next.as_mut_slice();
        self.pool.install(|| {
            partition::for_each_row_chunk(out, cols, chunk_rows, |rows, chunk| {
                for (row, row_out) in rows.zip(chunk.chunks_exact_mut(cols)) {
                    scan::scan_row(current, row, row_out);
                }
            });
        });
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
