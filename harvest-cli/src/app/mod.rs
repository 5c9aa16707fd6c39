//! Widget state machines. Each widget consumes key events one at a time and reports an
//! [`Outcome`] once the user submits or cancels. Nothing in here touches the terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

mod prompt;
mod selector;
mod text_input;

pub use prompt::{ConfirmPrompt, DatePrompt, PromptState, TextPrompt, TextPromptConfig};
pub use selector::{
    matches_filter, ReadyState, Selector, SelectorConfig, SelectorEvent, SelectorState,
};
pub use text_input::TextInput;

/// Where a widget is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Pending,
    Submitted(T),
    Cancelled,
}

/// A single-field widget driven by key presses.
pub trait Prompt {
    type Output;

    fn handle_key(&mut self, key: KeyEvent);

    fn outcome(&self) -> Outcome<Self::Output>;
}

/// Ctrl+C behaves like an interrupt in every widget.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

pub(crate) fn is_plain_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}
