use anyhow::{Context, Result};
use ratatui::Frame;

use super::input::{Input, InputSource};
use super::terminal::Surface;
use crate::types::Step;

/// One interactive run: a lazily opened terminal, the key source, and the steps
/// resolved so far. The terminal is only set up once a widget actually draws.
pub struct Session<S: Surface, I: InputSource> {
    surface: S,
    terminal: Option<ratatui::Terminal<S::Backend>>,
    input: I,
    steps: Vec<Step>,
}

impl<S: Surface, I: InputSource> Session<S, I> {
    pub fn new(surface: S, input: I) -> Self {
        Self {
            surface,
            terminal: None,
            input,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.steps.push(Step::new(label, value));
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame, &[Step])) -> Result<()> {
        if self.terminal.is_none() {
            let terminal = self.surface.open()?;
            self.terminal = Some(terminal);
        }

        let steps = &self.steps;
        if let Some(terminal) = self.terminal.as_mut() {
            terminal
                .draw(|frame| render(frame, steps))
                .context("Failed to draw to terminal")?;
        }
        Ok(())
    }

    pub async fn next_input(&mut self) -> Result<Input> {
        self.input.next_input().await
    }

    /// Restore the terminal (if it was opened) and hand back the recorded steps.
    pub fn finish(mut self) -> Result<Vec<Step>> {
        self.close()?;
        Ok(std::mem::take(&mut self.steps))
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut terminal) = self.terminal.take() {
            self.surface.close(&mut terminal)?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.terminal.is_some()
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[cfg(test)]
    pub fn input(&self) -> &I {
        &self.input
    }

    #[cfg(test)]
    pub fn backend(&self) -> Option<&S::Backend> {
        self.terminal.as_ref().map(|terminal| terminal.backend())
    }
}

impl<S: Surface, I: InputSource> Drop for Session<S, I> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::warn!("Failed to restore terminal: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{ScriptedInput, TestSurface};

    #[test]
    fn terminal_opens_on_first_draw_only() {
        let mut session = Session::new(TestSurface::default(), ScriptedInput::new([]));
        assert!(!session.is_open());

        session.draw(|_, _| {}).unwrap();
        session.draw(|_, _| {}).unwrap();
        assert_eq!(session.surface().opens, 1);
        assert!(session.is_open());
    }

    #[test]
    fn finish_returns_steps_in_order() {
        let mut session = Session::new(TestSurface::default(), ScriptedInput::new([]));
        session.record("Project", "Website");
        session.record("Task", "Design");

        let steps = session.finish().unwrap();
        assert_eq!(
            steps,
            vec![Step::new("Project", "Website"), Step::new("Task", "Design")]
        );
    }
}
