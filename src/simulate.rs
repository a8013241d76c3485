//! Drives an [`Engine`] for a number of generations and measures how long it takes.

use crate::enc::PlainText;
use crate::engine::Engine;
use crate::error::{LifeError, Result};
use crate::stats::Recorder;
use std::io;
use std::time::{Duration, Instant};

/// How a simulation run writes its progress
#[derive(Debug, Clone, Default)]
pub struct SimulateOptions {
    /// Write every generation to the output, not just the summary
    pub render: bool,
    pub symbols: PlainText,
}

/// A recorder that is never fed, for runs without statistics
struct Silent;
impl Recorder for Silent {
    type Str = &'static str;

    fn enabled(&self) -> bool {
        false
    }
    fn record(&mut self, _alive: usize) {}
    fn has_report(&self) -> bool {
        false
    }
    fn report(&mut self) -> Self::Str {
        ""
    }
}

/// Runs `generations` steps of `engine`, returning the total wall-clock time
///
/// `generations` is checked before anything runs, so a rejected call leaves
/// the engine untouched. When `options.render` is set each generation is
/// written to `writer` as a header line, the grid and a blank line.
pub fn simulate<E, W>(
    engine: &mut E,
    generations: i32,
    writer: &mut W,
    options: &SimulateOptions,
) -> Result<Duration>
where
    E: Engine + ?Sized,
    W: io::Write + ?Sized,
{
    simulate_recorded(engine, generations, writer, options, &mut Silent)
}

/// Like [`simulate`], also feeding every generation to `recorder` and printing
/// its reports as they become available
///
/// Only stepping and rendering are timed. Counting alive cells for the
/// recorder and printing its reports happen outside the measured time.
pub fn simulate_recorded<E, W, R>(
    engine: &mut E,
    generations: i32,
    writer: &mut W,
    options: &SimulateOptions,
    recorder: &mut R,
) -> Result<Duration>
where
    E: Engine + ?Sized,
    W: io::Write + ?Sized,
    R: Recorder,
{
    if generations <= 0 {
        return Err(LifeError::InvalidGenerationCount(generations));
    }

    let mut elapsed = Duration::ZERO;
    for _ in 0..generations {
        let start = Instant::now();
        engine.step();
        if options.render {
            write_generation(engine, writer, &options.symbols, elapsed + start.elapsed())?;
        }
        elapsed += start.elapsed();

        if recorder.enabled() {
            recorder.record(engine.current_grid().alive_count());
            if recorder.has_report() {
                println!("{}", recorder.report().as_ref());
            }
        }
    }
    Ok(elapsed)
}

fn write_generation<E, W>(
    engine: &E,
    writer: &mut W,
    symbols: &PlainText,
    elapsed: Duration,
) -> io::Result<()>
where
    E: Engine + ?Sized,
    W: io::Write + ?Sized,
{
    writeln!(
        writer,
        "Generation {} [Elapsed: {:.2} ms]",
        engine.generation(),
        millis(elapsed)
    )?;
    symbols.write_grid(engine.current_grid(), writer)
}

/// Writes the closing `Total ... execution time` line of a run
pub fn write_summary<W: io::Write + ?Sized>(
    writer: &mut W,
    label: &str,
    elapsed: Duration,
) -> io::Result<()> {
    writeln!(writer, "\nTotal {label} execution time: {:.2} ms", millis(elapsed))?;
    writer.flush()
}

#[inline]
pub fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grid, ParallelEngine, SequentialEngine, stats::Throughput};
    use std::cell::Cell;

    /// Counts how often the driver looks at the current grid
    struct GridReads {
        inner: SequentialEngine,
        reads: Cell<usize>,
    }
    impl GridReads {
        fn new(grid: Grid) -> Self {
            Self {
                inner: SequentialEngine::new(grid).expect("engine"),
                reads: Cell::new(0),
            }
        }
    }
    impl Engine for GridReads {
        fn step(&mut self) {
            self.inner.step();
        }
        fn restart(&mut self) {
            self.inner.restart();
        }
        fn current_grid(&self) -> &Grid {
            self.reads.set(self.reads.get() + 1);
            self.inner.current_grid()
        }
        fn initial_grid(&self) -> &Grid {
            self.inner.initial_grid()
        }
        fn generation(&self) -> u64 {
            self.inner.generation()
        }
    }

    fn blinker() -> Grid {
        let mut grid = Grid::new(5, 5);
        for col in 1..4 {
            grid.set(2, col, true);
        }
        grid
    }

    #[test]
    fn rejects_non_positive_generations() {
        let mut engine = SequentialEngine::new(blinker()).expect("engine");
        let mut out = Vec::new();

        for generations in [0, -1] {
            let err = simulate(&mut engine, generations, &mut out, &SimulateOptions::default())
                .unwrap_err();
            assert!(matches!(err, LifeError::InvalidGenerationCount(g) if g == generations));
        }
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.current_grid(), &blinker());
        assert!(out.is_empty());
    }

    #[test]
    fn parallel_rejects_non_positive_generations() {
        let mut engine = ParallelEngine::new(blinker()).expect("engine");
        let mut out = Vec::new();

        assert!(simulate(&mut engine, -1, &mut out, &SimulateOptions::default()).is_err());
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn runs_requested_generations() {
        let mut engine = SequentialEngine::new(blinker()).expect("engine");
        let mut out = Vec::new();

        simulate(&mut engine, 3, &mut out, &SimulateOptions::default()).expect("simulate");

        assert_eq!(engine.generation(), 3);
        assert!(out.is_empty());
    }

    #[test]
    fn renders_each_generation() {
        let mut engine = SequentialEngine::new(blinker()).expect("engine");
        let mut out = Vec::new();
        let options = SimulateOptions {
            render: true,
            symbols: PlainText::new('#', '.').expect("symbols"),
        };

        simulate(&mut engine, 2, &mut out, &options).expect("simulate");
        let text = String::from_utf8(out).unwrap();
        let blocks: Vec<&str> = text.split("\n\n").filter(|b| !b.is_empty()).collect();

        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("Generation 1 [Elapsed: "));
        assert!(blocks[0].ends_with("ms]\n.....\n..#..\n..#..\n..#..\n....."));
        assert!(blocks[1].starts_with("Generation 2 [Elapsed: "));
        assert!(blocks[1].ends_with("ms]\n.....\n.....\n.###.\n.....\n....."));
    }

    #[test]
    fn recorder_sees_every_generation() {
        let mut engine = SequentialEngine::new(blinker()).expect("engine");
        let mut record = Throughput::new("seq", 3);

        simulate_recorded(
            &mut engine,
            4,
            &mut io::sink(),
            &SimulateOptions::default(),
            &mut record,
        )
        .expect("simulate");

        assert_eq!(record.generations(), 4);
    }

    #[test]
    fn plain_run_never_reads_the_grid() {
        let mut engine = GridReads::new(blinker());

        simulate(&mut engine, 5, &mut io::sink(), &SimulateOptions::default()).expect("simulate");

        assert_eq!(engine.generation(), 5);
        assert_eq!(engine.reads.get(), 0);
    }

    #[test]
    fn recorded_run_reads_the_grid_once_per_generation() {
        let mut engine = GridReads::new(blinker());
        let mut record = Throughput::new("seq", 3);

        simulate_recorded(
            &mut engine,
            5,
            &mut io::sink(),
            &SimulateOptions::default(),
            &mut record,
        )
        .expect("simulate");

        assert_eq!(engine.reads.get(), 5);
        assert_eq!(record.generations(), 5);
    }

    #[test]
    fn summary_line() {
        let mut out = Vec::new();
        write_summary(&mut out, "sequential", Duration::from_micros(1500)).expect("write");

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nTotal sequential execution time: 1.50 ms\n"
        );
    }
}
