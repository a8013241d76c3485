//! Progress reporting for simulation runs.

use std::time::{Duration, Instant};
use std::{fs, io, path::Path};

/// Collects per-generation measurements while a simulation runs
pub trait Recorder {
    type Str: AsRef<str>;

    /// Whether the driver should count alive cells and call [`Recorder::record`]
    fn enabled(&self) -> bool {
        true
    }
    /// Called once per generation with the number of alive cells
    fn record(&mut self, alive: usize);

    fn has_report(&self) -> bool;
    fn report(&mut self) -> Self::Str;
}

/// Prints the generation rate of one engine every [`Throughput::REPORT_INTERVAL`]
pub struct Throughput {
    label: String,
    generations: u64,
    alive: usize,
    since_report: u64,
    last_report: Instant,
}
impl Throughput {
    pub const REPORT_INTERVAL: Duration = Duration::from_millis(500);

    pub fn new<S: Into<String>>(label: S, alive: usize) -> Self {
        Self {
            label: label.into(),
            generations: 0,
            alive,
            since_report: 0,
            last_report: Instant::now(),
        }
    }

    #[inline]
    pub fn generations(&self) -> u64 {
        self.generations
    }
}
impl Recorder for Throughput {
    type Str = String;

    fn record(&mut self, alive: usize) {
        self.generations += 1;
        self.since_report += 1;
        self.alive = alive;
    }

    fn has_report(&self) -> bool {
        self.last_report.elapsed() >= Self::REPORT_INTERVAL
    }
    fn report(&mut self) -> Self::Str {
        let rate = self.since_report as f64 / self.last_report.elapsed().as_secs_f64();
        self.last_report = Instant::now();
        self.since_report = 0;

        format!(
            "[{}] {:.02}gen/s gens:{}, alive:{}",
            self.label, rate, self.generations, self.alive
        )
    }
}

/// One csv row per generation: the time since the previous one and the
/// population after it
pub struct GenerationLog {
    throughput: Throughput,
    rows: Vec<(Duration, usize)>,
    last: Instant,
}
impl GenerationLog {
    pub fn new<S: Into<String>>(label: S, alive: usize) -> Self {
        Self {
            throughput: Throughput::new(label, alive),
            rows: Vec::new(),
            last: Instant::now(),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = fs::File::create(path)?;
        self.write_csv(io::BufWriter::new(file))
    }

    fn write_csv<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "generation,delta_us,alive")?;
        for (generation, (delta, alive)) in (1..).zip(&self.rows) {
            writeln!(out, "{generation},{},{alive}", delta.as_micros())?;
        }
        out.flush()
    }
}
impl Recorder for GenerationLog {
    type Str = String;

    fn record(&mut self, alive: usize) {
        let now = Instant::now();
        self.rows.push((now - self.last, alive));
        self.last = now;
        self.throughput.record(alive);
    }

    fn has_report(&self) -> bool {
        self.throughput.has_report()
    }
    fn report(&mut self) -> Self::Str {
        self.throughput.report()
    }
}
