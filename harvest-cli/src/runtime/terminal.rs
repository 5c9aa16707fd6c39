use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};

/// Something a session can draw on: opened on first use, closed when the session ends.
pub trait Surface {
    type Backend: Backend<Error = Self::Error>;
    type Error: std::error::Error + Send + Sync + 'static;

    fn open(&mut self) -> Result<Terminal<Self::Backend>>;

    fn close(&mut self, terminal: &mut Terminal<Self::Backend>) -> Result<()>;
}

/// The user's terminal, in raw mode on the alternate screen while open.
#[derive(Debug, Default)]
pub struct CrosstermSurface;

impl Surface for CrosstermSurface {
    type Backend = CrosstermBackend<Stdout>;
    type Error = io::Error;

    fn open(&mut self) -> Result<Terminal<Self::Backend>> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).context("Failed to create terminal")
    }

    fn close(&mut self, terminal: &mut Terminal<Self::Backend>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Headless surface for tests. Counts how often it was opened.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestSurface {
    pub opens: usize,
    pub closes: usize,
}

#[cfg(test)]
impl Surface for TestSurface {
    type Backend = ratatui::backend::TestBackend;
    type Error = std::convert::Infallible;

    fn open(&mut self) -> Result<Terminal<Self::Backend>> {
        self.opens += 1;
        Terminal::new(ratatui::backend::TestBackend::new(100, 30))
            .context("Failed to create test terminal")
    }

    fn close(&mut self, _terminal: &mut Terminal<Self::Backend>) -> Result<()> {
        self.closes += 1;
        Ok(())
    }
}
