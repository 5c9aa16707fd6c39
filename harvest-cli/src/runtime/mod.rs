mod input;
mod prompts;
mod selector;
mod session;
mod terminal;

pub use input::{InputSource, TerminalInput};
pub use prompts::{run_confirm, run_date_prompt, run_text_prompt, PromptError};
pub use selector::{run_selector, SelectorError};
pub use session::Session;
pub use terminal::{CrosstermSurface, Surface};

#[cfg(test)]
pub use input::ScriptedInput;
#[cfg(test)]
pub use terminal::TestSurface;

/// The session used by the binary: the real terminal and its key stream.
pub type TerminalSession = Session<CrosstermSurface, TerminalInput>;

pub fn terminal_session() -> TerminalSession {
    Session::new(CrosstermSurface, TerminalInput::new())
}
