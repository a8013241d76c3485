use rayon::prelude::*;
use std::ops::Range;

/// Smallest number of rows handed to a single task
pub const MIN_CHUNK_ROWS: usize = 16;
/// How many chunks each worker should get on a large grid
pub const CHUNKS_PER_WORKER: usize = 4;

/// Picks how many rows go into each chunk for a grid of `rows` rows
///
/// Aims for [`CHUNKS_PER_WORKER`] chunks per worker so that a slow worker can
/// be balanced out by the others, but never goes below [`MIN_CHUNK_ROWS`].
#[inline]
pub fn chunk_rows(rows: usize, workers: usize) -> usize {
    (rows / (workers.max(1) * CHUNKS_PER_WORKER)).max(MIN_CHUNK_ROWS)
}

/// Runs `f` in parallel over contiguous chunks of `chunk_rows` rows of `out`
///
/// `out` is a row-major buffer `cols` wide. Each call of `f` receives the row
/// indices it covers and the matching mutable slice, so no cell is ever handed
/// to more than one task. Returns once every chunk has been processed.
pub fn for_each_row_chunk<F>(out: &mut [bool], cols: usize, chunk_rows: usize, f: F)
where
    F: Fn(Range<usize>, &mut [bool]) + Send + Sync,
{
    if cols == 0 {
        return;
    }
    let chunk_rows = chunk_rows.max(1);
    out.par_chunks_mut(chunk_rows * cols)
        .enumerate()
        .for_each(|(i, chunk)| {
            let start = i * chunk_rows;
            f(start..start + chunk.len() / cols, chunk)
        });
}
