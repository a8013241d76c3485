use std::{path::PathBuf, str::FromStr, time::Duration};

use lifebench::{Grid, LifeError, ParallelConfig, PlainText, Result, enc::GridEncoder};
use rand::{SeedableRng, rngs::StdRng};

const DEFAULT_GENERATIONS: i32 = 100;
const DEFAULT_SIZE: i32 = 500;

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("", "console", "run in console mode");
        opts.optflag("", "render", "write every generation to the output files");
        opts.optopt("r", "rows", "set grid rows", "ROWS");
        opts.optopt("c", "cols", "set grid columns", "COLS");
        opts.optopt(
            "f",
            "fill",
            "set fill type (random, alternating, all, empty, pattern)",
            "TYPE",
        );
        opts.optopt("i", "input", "read the initial grid from a text file", "FILE");
        opts.optopt("", "seed", "seed for random fills", "SEED");
        opts.optopt("g", "gens", "number of generations", "COUNT");
        opts.optopt("t", "threads", "threads for the parallel engine", "COUNT");
        opts.optopt("", "chunk", "rows per parallel task", "ROWS");
        opts.optopt("e", "engine", "engine to run (seq, par, both)", "ENGINE");
        opts.optopt("o", "output", "directory for simulation output", "DIR");
        opts.optopt("", "alive", "character for alive cells", "CHAR");
        opts.optopt("", "dead", "character for dead cells", "CHAR");
        opts.optopt(
            "s",
            "sleep",
            "the amount of time to sleep between generations",
            "MILLIS",
        );
        opts.optopt("", "stats", "write per-generation csv stats", "PREFIX");

        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: lifebench [options]"));
            Ok(None)
        } else {
            Ok(Some(Self { matches }))
        }
    }
    pub fn from_env() -> Result<Option<Self>> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    fn get<T: FromStr>(&self, name: &'static str) -> Result<Option<T>> {
        let Some(value) = self.matches.opt_str(name) else {
            return Ok(None);
        };
        value
            .parse()
            .map(Some)
            .map_err(|_| LifeError::InvalidOption { name, value })
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn render(&self) -> bool {
        self.matches.opt_present("render")
    }

    pub fn generations(&self) -> Result<i32> {
        Ok(self.get("gens")?.unwrap_or(DEFAULT_GENERATIONS))
    }
    /// How many generations the console shows, `None` runs until Ctrl+C
    pub fn console_limit(&self) -> Result<Option<u64>> {
        match self.get::<i32>("gens")? {
            Some(gens) if gens <= 0 => Err(LifeError::InvalidGenerationCount(gens)),
            gens => Ok(gens.map(|gens| gens as u64)),
        }
    }
    pub fn sleep(&self) -> Result<Option<Duration>> {
        Ok(match self.get("sleep")? {
            Some(millis) => Some(Duration::from_millis(millis)),
            None if self.console() => Some(Duration::from_millis(100)),
            None => None,
        })
    }

    pub fn grid_size(&self) -> Result<(i32, i32)> {
        let default = if self.console() {
            let (cols, rows) = crossterm::terminal::size()?;
            // leave the last line for the report footer
            ((rows as i32 - 1).max(1), cols as i32)
        } else {
            (DEFAULT_SIZE, DEFAULT_SIZE)
        };

        Ok((
            self.get("rows")?.unwrap_or(default.0),
            self.get("cols")?.unwrap_or(default.1),
        ))
    }
    pub fn fill_mode(&self) -> Result<FillMode> {
        let mode_str = self.matches.opt_str("fill");
        let mode_str = mode_str.as_deref().unwrap_or("random");
        FillMode::new(mode_str).ok_or_else(|| LifeError::InvalidOption {
            name: "fill",
            value: mode_str.to_owned(),
        })
    }
    pub fn engine(&self) -> Result<EngineChoice> {
        let engine_str = self.matches.opt_str("engine");
        let engine_str = engine_str.as_deref().unwrap_or("both");
        EngineChoice::new(engine_str).ok_or_else(|| LifeError::InvalidOption {
            name: "engine",
            value: engine_str.to_owned(),
        })
    }

    pub fn parallel_config(&self) -> Result<ParallelConfig> {
        let mut config = ParallelConfig::default();
        if let Some(n) = self.get("threads")? {
            config = config.thread_count(n);
        }
        if let Some(n) = self.get("chunk")? {
            config = config.chunk_rows(n);
        }
        Ok(config)
    }

    pub fn symbols(&self) -> Result<PlainText> {
        let default = PlainText::default();
        PlainText::new(
            self.get("alive")?.unwrap_or(default.alive()),
            self.get("dead")?.unwrap_or(default.dead()),
        )
    }

    /// Builds the initial grid from `--input` or the fill options
    pub fn initial_grid(&self) -> Result<Grid> {
        if let Some(file_name) = self.matches.opt_str("input") {
            let text = std::fs::read_to_string(file_name)?;
            return self.symbols()?.decode(&text);
        }

        let (rows, cols) = self.grid_size()?;
        let mut rng = match self.get::<u64>("seed")? {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        self.fill_mode()?.create_grid(rows, cols, &mut rng)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.matches
            .opt_str("output")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
    pub fn stats_prefix(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineChoice {
    Sequential,
    Parallel,
    Both,
}
impl EngineChoice {
    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "seq" | "sequential" => Some(Self::Sequential),
            "par" | "parallel" => Some(Self::Parallel),
            "both" => Some(Self::Both),
            _ => None,
        }
    }

    pub fn runs_sequential(self) -> bool {
        matches!(self, Self::Sequential | Self::Both)
    }
    pub fn runs_parallel(self) -> bool {
        matches!(self, Self::Parallel | Self::Both)
    }
}

pub enum FillMode {
    Random,
    Alternating,
    All,
    Empty,
    Pattern,
}
impl FillMode {
    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "random" => Some(Self::Random),
            "alternating" => Some(Self::Alternating),
            "all" => Some(Self::All),
            "empty" => Some(Self::Empty),
            "pattern" => Some(Self::Pattern),
            _ => None,
        }
    }

    /// Two separated rings of cells on an 18x11 field
    const PATTERN: [&'static str; 18] = [
        "...........",
        "...........",
        "...........",
        "....OOO....",
        "...O...O...",
        "...O...O...",
        "....OOO....",
        "...........",
        "...........",
        "...........",
        "...........",
        "....OOO....",
        "...O...O...",
        "...O...O...",
        "....OOO....",
        "...........",
        "...........",
        "...........",
    ];

    fn fill_cell<R: rand::Rng>(&self, row: usize, col: usize, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.random_bool(0.5),
            Self::Alternating => (row + col) % 2 == 0,
            Self::All => true,
            Self::Empty | Self::Pattern => false,
        }
    }

    /// Creates a `rows` by `cols` grid, except for [`FillMode::Pattern`] which has a fixed size
    pub fn create_grid<R: rand::Rng>(self, rows: i32, cols: i32, rng: &mut R) -> Result<Grid> {
        if let Self::Pattern = self {
            return PlainText::default().decode(&Self::PATTERN.join("\n"));
        }
        Grid::filled(rows, cols, |row, col| self.fill_cell(row, col, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(args: &[&str]) -> Args {
        Args::new(args).expect("valid args").expect("not help")
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(5)
    }

    #[test]
    fn fill_mode_parses() {
        let args = args(&["--fill", "alternating"]);

        assert!(matches!(args.fill_mode(), Ok(FillMode::Alternating)));
    }

    #[test]
    fn unknown_fill_mode_is_rejected() {
        let args = args(&["--fill", "sparse"]);

        assert!(matches!(
            args.fill_mode(),
            Err(LifeError::InvalidOption { name: "fill", .. })
        ));
    }

    #[test]
    fn bad_number_is_rejected() {
        let args = args(&["--gens", "ten"]);

        assert!(matches!(
            args.generations(),
            Err(LifeError::InvalidOption { name: "gens", .. })
        ));
    }

    #[test]
    fn console_runs_unbounded_without_gens() {
        assert_eq!(args(&[]).console_limit().expect("limit"), None);
        assert_eq!(args(&["-g", "5"]).console_limit().expect("limit"), Some(5));
        assert!(matches!(
            args(&["-g", "0"]).console_limit(),
            Err(LifeError::InvalidGenerationCount(0))
        ));
        assert_eq!(args(&[]).generations().expect("gens"), DEFAULT_GENERATIONS);
    }

    #[test]
    fn help_returns_none() {
        assert!(Args::new(&["--help"]).expect("parse").is_none());
    }

    #[test]
    fn engine_defaults_to_both() {
        let engine = args(&[]).engine().expect("engine");

        assert!(engine.runs_parallel() && engine.runs_sequential());
        assert_eq!(args(&["-e", "seq"]).engine().expect("engine"), EngineChoice::Sequential);
    }

    #[test]
    fn parallel_config_from_args() {
        let config = args(&["-t", "3", "--chunk", "8"])
            .parallel_config()
            .expect("config");

        assert_eq!(config.thread_count, Some(3));
        assert_eq!(config.chunk_rows, Some(8));
    }

    #[test]
    fn seeded_grids_repeat() {
        let args = args(&["-r", "20", "-c", "30", "--seed", "99"]);

        assert_eq!(
            args.initial_grid().expect("grid"),
            args.initial_grid().expect("grid")
        );
    }

    #[test]
    fn create_grid_all_fills_grid() {
        let grid = FillMode::All.create_grid(2, 3, &mut rng()).expect("grid");

        assert_eq!(grid.alive_count(), 6);
    }

    #[test]
    fn create_grid_empty_is_empty() {
        let grid = FillMode::Empty.create_grid(5, 4, &mut rng()).expect("grid");

        assert_eq!(grid.alive_count(), 0);
        assert_eq!((grid.rows(), grid.cols()), (5, 4));
    }

    #[test]
    fn create_grid_alternating_uses_parity() {
        let grid = FillMode::Alternating
            .create_grid(3, 3, &mut rng())
            .expect("grid");

        let expected = Grid::from_rows(&[
            [true, false, true],
            [false, true, false],
            [true, false, true],
        ])
        .expect("grid");
        assert_eq!(grid, expected);
    }

    #[test]
    fn create_grid_rejects_bad_dimensions() {
        assert!(matches!(
            FillMode::All.create_grid(0, 3, &mut rng()),
            Err(LifeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn pattern_has_fixed_shape() {
        let grid = FillMode::Pattern.create_grid(1, 1, &mut rng()).expect("grid");

        assert_eq!((grid.rows(), grid.cols()), (18, 11));
        assert_eq!(grid.alive_count(), 20);
    }
}
