use crate::error::{LifeError, Result};
use crate::Grid;
use std::io;

pub trait GridEncoder {
    fn encode(&self, grid: &Grid) -> String;
    fn decode(&self, value: &str) -> Result<Grid>;
}

/// A plain character dump of a grid, one character per cell and one line per row
///
/// ```text
/// .O.
/// .O.
/// .O.
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainText {
    alive: char,
    dead: char,
}

impl PlainText {
    pub fn new(alive: char, dead: char) -> Result<Self> {
        if alive == dead {
            return Err(LifeError::InvalidSymbols(alive));
        }
        Ok(Self { alive, dead })
    }

    #[inline]
    pub fn alive(&self) -> char {
        self.alive
    }
    #[inline]
    pub fn dead(&self) -> char {
        self.dead
    }

    /// The character used for a cell in the given state
    #[inline]
    pub fn symbol(&self, alive: bool) -> char {
        if alive { self.alive } else { self.dead }
    }

    fn is_comment(&self, line: &str) -> bool {
        line.starts_with('#') && self.alive != '#' && self.dead != '#'
    }

    /// Streams `grid` into `writer` followed by a blank line
    pub fn write_grid<W: io::Write + ?Sized>(&self, grid: &Grid, writer: &mut W) -> io::Result<()> {
        let width = self.alive.len_utf8().max(self.dead.len_utf8());
        let mut line = String::with_capacity(grid.cols() * width + 1);
        for row in grid.rows_iter() {
            line.clear();
            line.extend(row.iter().map(|&alive| self.symbol(alive)));
            line.push('\n');
            writer.write_all(line.as_bytes())?;
        }
        writer.write_all(b"\n")
    }
}

impl Default for PlainText {
    fn default() -> Self {
        Self {
            alive: 'O',
            dead: '.',
        }
    }
}

impl GridEncoder for PlainText {
    fn encode(&self, grid: &Grid) -> String {
        let mut out = String::new();
        for row in grid.rows_iter() {
            out.extend(row.iter().map(|&alive| self.symbol(alive)));
            out.push('\n');
        }
        out
    }

    /// Parses a grid, skipping blank lines and `#` comment lines
    fn decode(&self, value: &str) -> Result<Grid> {
        let line_re = regex::Regex::new(&format!(
            "^[{}{}]+$",
            regex::escape(&self.alive.to_string()),
            regex::escape(&self.dead.to_string())
        ))
        .map_err(|err| LifeError::Decode {
            line: 0,
            reason: err.to_string(),
        })?;

        let mut rows = Vec::new();
        for (i, line) in value.lines().enumerate() {
            if line.is_empty() || self.is_comment(line) {
                continue;
            }
            if !line_re.is_match(line) {
                return Err(LifeError::Decode {
                    line: i + 1,
                    reason: format!(
                        "expected only {:?} and {:?} characters",
                        self.alive, self.dead
                    ),
                });
            }
            rows.push(line.chars().map(|c| c == self.alive).collect::<Vec<_>>());
        }

        Grid::from_rows(&rows)
    }
}
