use ratatui::Frame;
use time::Date;

use super::input::{Input, InputSource};
use super::session::Session;
use super::terminal::Surface;
use crate::app::{ConfirmPrompt, DatePrompt, Outcome, Prompt, TextPrompt, TextPromptConfig};
use crate::types::Step;
use crate::ui;

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Prompt cancelled")]
    Cancelled,
    #[error(transparent)]
    Terminal(#[from] anyhow::Error),
}

async fn run_prompt<P, S, I>(
    session: &mut Session<S, I>,
    prompt: &mut P,
    render: impl Fn(&mut Frame, &P, &[Step]),
) -> Result<P::Output, PromptError>
where
    P: Prompt,
    S: Surface,
    I: InputSource,
{
    loop {
        session.draw(|frame, steps| render(frame, prompt, steps))?;

        match session.next_input().await? {
            Input::Key(key) => prompt.handle_key(key),
            Input::Tick => continue,
            Input::Closed => return Err(PromptError::Cancelled),
        }

        match prompt.outcome() {
            Outcome::Submitted(value) => return Ok(value),
            Outcome::Cancelled => return Err(PromptError::Cancelled),
            Outcome::Pending => {}
        }
    }
}

pub async fn run_text_prompt<S: Surface, I: InputSource>(
    session: &mut Session<S, I>,
    config: TextPromptConfig,
) -> Result<String, PromptError> {
    let mut prompt = TextPrompt::new(config);
    run_prompt(session, &mut prompt, ui::render_text_prompt).await
}

pub async fn run_date_prompt<S: Surface, I: InputSource>(
    session: &mut Session<S, I>,
    title: &str,
    today: Date,
) -> Result<Date, PromptError> {
    let mut prompt = DatePrompt::new(title, today);
    run_prompt(session, &mut prompt, ui::render_date_prompt).await
}

pub async fn run_confirm<S: Surface, I: InputSource>(
    session: &mut Session<S, I>,
    title: &str,
    message: &str,
) -> Result<bool, PromptError> {
    let mut prompt = ConfirmPrompt::new(title, message);
    run_prompt(session, &mut prompt, ui::render_confirm_prompt).await
}
