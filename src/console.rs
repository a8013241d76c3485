use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEvent, KeyModifiers},
    execute, queue, terminal,
};
use lifebench::{Grid, PlainText};
use std::io::{self, Write};

pub enum ConsoleCommand {
    Exit,
    Restart,
    Handled,
}

/// Draws the visible part of a grid to the terminal
///
/// The view can be scrolled with the arrow keys; `r` restarts the simulation
/// and Ctrl+C exits.
pub struct ConsoleRender {
    top: usize,
    left: usize,
    symbols: PlainText,
    report: String,
}
impl ConsoleRender {
    pub fn new(symbols: PlainText) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide)?;
        Ok(Self {
            top: 0,
            left: 0,
            symbols,
            report: String::new(),
        })
    }

    pub fn render(&self, grid: &Grid) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        // the last terminal line is the report footer
        let visible_rows = (rows as usize).saturating_sub(1);
        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;

        let mut line = String::new();
        for (y, row) in grid
            .rows_iter()
            .skip(self.top)
            .take(visible_rows)
            .enumerate()
        {
            line.clear();
            line.extend(
                row.iter()
                    .skip(self.left)
                    .take(cols as usize)
                    .map(|&alive| self.symbols.symbol(alive)),
            );
            queue!(stdout, cursor::MoveTo(0, y as u16))?;
            stdout.write_all(line.as_bytes())?;
        }

        // write footer
        queue!(stdout, cursor::MoveTo(0, rows.saturating_sub(1)))?;
        stdout.write_all(self.report.as_bytes())?;

        stdout.flush()
    }

    pub fn poll_events(&mut self) -> io::Result<Option<ConsoleCommand>> {
        // make sure event is preset for us to take
        if !event::poll(std::time::Duration::from_secs(0))? {
            return Ok(None);
        }

        let mut outp = Ok(Some(ConsoleCommand::Handled));
        match event::read()? {
            // CTRL+C
            event::Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }) => {
                outp = Ok(Some(ConsoleCommand::Exit));
            }
            event::Event::Key(KeyEvent {
                code: KeyCode::Char('r'),
                ..
            }) => {
                outp = Ok(Some(ConsoleCommand::Restart));
            }
            // arrows to move grid
            event::Event::Key(
                ev @ KeyEvent {
                    code: KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right,
                    ..
                },
            ) => match ev.code {
                KeyCode::Up => self.top = self.top.saturating_sub(1),
                KeyCode::Down => self.top += 1,
                KeyCode::Left => self.left = self.left.saturating_sub(1),
                KeyCode::Right => self.left += 1,
                _ => {}
            },
            _ => {}
        }
        outp
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        // if we can enable it, we should be able to disable it
        terminal::disable_raw_mode().expect("disable raw mode");
        execute!(io::stdout(), cursor::Show).expect("enable cursor");
    }
}
