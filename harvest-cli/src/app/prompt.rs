use crossterm::event::{KeyCode, KeyEvent};
use time::Date;

use super::{is_interrupt, is_plain_char, Outcome, Prompt, TextInput};
use crate::time_utils::parse_date;

const DEFAULT_CHAR_LIMIT: usize = 200;
const DATE_CHAR_LIMIT: usize = 10;

pub type Validator = Box<dyn Fn(&str) -> Result<(), String> + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStatus {
    Editing,
    Submitted,
    Cancelled,
}

/// Edit buffer shared by the text and date prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptState {
    pub input: TextInput,
    pub validation_error: Option<String>,
    pub status: PromptStatus,
}

impl PromptState {
    fn new(initial: &str) -> Self {
        Self {
            input: TextInput::from_str(initial),
            validation_error: None,
            status: PromptStatus::Editing,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.status == PromptStatus::Editing
    }

    fn reject(&mut self, message: impl Into<String>) {
        self.validation_error = Some(message.into());
    }

    fn submit(&mut self) {
        self.validation_error = None;
        self.status = PromptStatus::Submitted;
    }

    fn cancel(&mut self) {
        self.status = PromptStatus::Cancelled;
    }

    /// Apply an editing key. Returns false when the key is not an editing key.
    fn edit(&mut self, key: &KeyEvent, char_limit: usize) -> bool {
        if let Some(c) = is_plain_char(key) {
            if self.input.char_count() < char_limit {
                self.input.insert(c);
            }
            self.validation_error = None;
            return true;
        }

        match key.code {
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.home(),
            KeyCode::End => self.input.end(),
            _ => return false,
        }
        true
    }
}

pub struct TextPromptConfig {
    pub title: String,
    pub prompt_text: String,
    pub placeholder: String,
    pub required: bool,
    pub password: bool,
    pub char_limit: usize,
    pub default_value: Option<String>,
    pub validate: Option<Validator>,
}

impl Default for TextPromptConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            prompt_text: "Enter text:".to_string(),
            placeholder: String::new(),
            required: false,
            password: false,
            char_limit: DEFAULT_CHAR_LIMIT,
            default_value: None,
            validate: None,
        }
    }
}

impl TextPromptConfig {
    pub fn new(title: impl Into<String>, prompt_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            prompt_text: prompt_text.into(),
            ..Self::default()
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn password(mut self) -> Self {
        self.password = true;
        self
    }

    pub fn char_limit(mut self, limit: usize) -> Self {
        self.char_limit = limit.max(1);
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn validate(
        mut self,
        validate: impl Fn(&str) -> Result<(), String> + Send + 'static,
    ) -> Self {
        self.validate = Some(Box::new(validate));
        self
    }
}

pub struct TextPrompt {
    pub config: TextPromptConfig,
    pub state: PromptState,
    value: Option<String>,
}

impl TextPrompt {
    pub fn new(config: TextPromptConfig) -> Self {
        let initial = config.default_value.clone().unwrap_or_default();
        Self {
            config,
            state: PromptState::new(&initial),
            value: None,
        }
    }

    pub fn remaining_chars(&self) -> usize {
        self.config
            .char_limit
            .saturating_sub(self.state.input.char_count())
    }

    fn try_submit(&mut self) {
        let value = self.state.input.value.trim().to_string();

        if self.config.required && value.is_empty() {
            self.state.reject("this field is required");
            return;
        }

        if let Some(validate) = &self.config.validate {
            if let Err(message) = validate(&value) {
                self.state.reject(message);
                return;
            }
        }

        self.value = Some(value);
        self.state.submit();
    }
}

impl Prompt for TextPrompt {
    type Output = String;

    fn handle_key(&mut self, key: KeyEvent) {
        if !self.state.is_editing() {
            return;
        }

        if is_interrupt(&key) || key.code == KeyCode::Esc {
            self.state.cancel();
            return;
        }

        if key.code == KeyCode::Enter {
            self.try_submit();
            return;
        }

        self.state.edit(&key, self.config.char_limit);
    }

    fn outcome(&self) -> Outcome<String> {
        match (self.state.status, &self.value) {
            (PromptStatus::Submitted, Some(value)) => Outcome::Submitted(value.clone()),
            (PromptStatus::Cancelled, _) => Outcome::Cancelled,
            _ => Outcome::Pending,
        }
    }
}

pub struct DatePrompt {
    pub title: String,
    pub state: PromptState,
    today: Date,
    date: Option<Date>,
}

impl DatePrompt {
    pub fn new(title: impl Into<String>, today: Date) -> Self {
        Self {
            title: title.into(),
            state: PromptState::new(""),
            today,
            date: None,
        }
    }

    pub fn today(&self) -> Date {
        self.today
    }

    fn try_submit(&mut self) {
        let text = self.state.input.value.trim();

        let date = if text.is_empty() {
            self.today
        } else {
            match parse_date(text) {
                Ok(date) => date,
                Err(_) => {
                    self.state.reject("invalid date format, use YYYY-MM-DD");
                    return;
                }
            }
        };

        self.date = Some(date);
        self.state.submit();
    }
}

impl Prompt for DatePrompt {
    type Output = Date;

    fn handle_key(&mut self, key: KeyEvent) {
        if !self.state.is_editing() {
            return;
        }

        if is_interrupt(&key) || key.code == KeyCode::Esc {
            self.state.cancel();
            return;
        }

        if key.code == KeyCode::Enter {
            self.try_submit();
            return;
        }

        self.state.edit(&key, DATE_CHAR_LIMIT);
    }

    fn outcome(&self) -> Outcome<Date> {
        match (self.state.status, self.date) {
            (PromptStatus::Submitted, Some(date)) => Outcome::Submitted(date),
            (PromptStatus::Cancelled, _) => Outcome::Cancelled,
            _ => Outcome::Pending,
        }
    }
}

/// Yes/no question answered with a single key.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    answer: Option<bool>,
    cancelled: bool,
}

impl ConfirmPrompt {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            answer: None,
            cancelled: false,
        }
    }
}

impl Prompt for ConfirmPrompt {
    type Output = bool;

    fn handle_key(&mut self, key: KeyEvent) {
        if self.answer.is_some() || self.cancelled {
            return;
        }

        if is_interrupt(&key) || key.code == KeyCode::Esc {
            self.cancelled = true;
            return;
        }

        match is_plain_char(&key) {
            Some('y') | Some('Y') => self.answer = Some(true),
            Some('n') | Some('N') => self.answer = Some(false),
            _ => {}
        }
    }

    fn outcome(&self) -> Outcome<bool> {
        match (self.answer, self.cancelled) {
            (_, true) => Outcome::Cancelled,
            (Some(answer), false) => Outcome::Submitted(answer),
            (None, false) => Outcome::Pending,
        }
    }
}
