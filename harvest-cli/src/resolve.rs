//! Per-field resolution: a value given on the command line is used as is, anything missing
//! is asked for interactively.

use std::sync::Arc;

use harvest::{ListParams, TimeEntry};
use thiserror::Error;
use time::Date;

use crate::api::DataSource;
use crate::app::{SelectorConfig, TextPromptConfig};
use crate::duration::{self, ParseError, ParsedDuration, DURATION_HINT};
use crate::runtime::{
    run_confirm, run_date_prompt, run_selector, run_text_prompt, InputSource, PromptError,
    SelectorError, Session, Surface,
};
use crate::time_utils::format_date;
use crate::types::{EntryItem, SelectableItem};

const DURATION_CHAR_LIMIT: usize = 20;

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Cancelled")]
    Cancelled,
    #[error("{0}")]
    LoadFailed(String),
    #[error(transparent)]
    Invalid(ParseError),
    #[error("Terminal error: {0:#}")]
    Terminal(anyhow::Error),
}

impl From<SelectorError> for ResolutionError {
    fn from(err: SelectorError) -> Self {
        match err {
            SelectorError::LoadFailed(cause) => ResolutionError::LoadFailed(cause),
            SelectorError::Cancelled => ResolutionError::Cancelled,
            SelectorError::Terminal(err) => ResolutionError::Terminal(err),
        }
    }
}

impl From<PromptError> for ResolutionError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Cancelled => ResolutionError::Cancelled,
            PromptError::Terminal(err) => ResolutionError::Terminal(err),
        }
    }
}

/// Resolves one field at a time against a session, recording each result as a step.
pub struct FieldResolver<'a, S: Surface, I: InputSource> {
    session: &'a mut Session<S, I>,
    source: Arc<dyn DataSource>,
    today: Date,
}

impl<'a, S: Surface, I: InputSource> FieldResolver<'a, S, I> {
    pub fn new(session: &'a mut Session<S, I>, source: Arc<dyn DataSource>, today: Date) -> Self {
        Self {
            session,
            source,
            today,
        }
    }

    pub async fn project(&mut self, flag: Option<i64>) -> Result<i64, ResolutionError> {
        if let Some(project_id) = flag {
            self.session.record("Project", project_id.to_string());
            return Ok(project_id);
        }

        let source = self.source.clone();
        let item = run_selector(
            self.session,
            SelectorConfig::new("Select a Project")
                .empty_message("No projects assigned to you.")
                .loading_message("Loading projects..."),
            async move { source.list_assigned_projects().await },
        )
        .await?;

        tracing::debug!(project_id = item.project_id(), "project selected");
        self.session.record("Project", item.title());
        Ok(item.project_id())
    }

    pub async fn task(
        &mut self,
        flag: Option<i64>,
        project_id: i64,
    ) -> Result<i64, ResolutionError> {
        if let Some(task_id) = flag {
            self.session.record("Task", task_id.to_string());
            return Ok(task_id);
        }

        let source = self.source.clone();
        let item = run_selector(
            self.session,
            SelectorConfig::new("Select a Task")
                .empty_message("No tasks found for this project.")
                .loading_message("Loading tasks..."),
            async move { source.list_tasks(project_id).await },
        )
        .await?;

        tracing::debug!(task_id = item.task_id(), "task selected");
        self.session.record("Task", item.title());
        Ok(item.task_id())
    }

    pub async fn date(&mut self, flag: Option<Date>) -> Result<Date, ResolutionError> {
        let date = match flag {
            Some(date) => date,
            None => run_date_prompt(self.session, "Date", self.today).await?,
        };

        self.session.record("Date", format_date(date));
        Ok(date)
    }

    /// Keeps asking until the input parses or the user cancels.
    pub async fn duration(
        &mut self,
        flag: Option<ParsedDuration>,
    ) -> Result<ParsedDuration, ResolutionError> {
        let duration = match flag {
            Some(duration) => duration,
            None => {
                let config = TextPromptConfig::new(
                    "Duration",
                    format!("How long did you work? {}", DURATION_HINT),
                )
                .placeholder("1h30m")
                .required()
                .char_limit(DURATION_CHAR_LIMIT)
                .validate(|value| {
                    duration::parse(value)
                        .map(|_| ())
                        .map_err(|err| err.to_string())
                });

                let text = run_text_prompt(self.session, config).await?;
                duration::parse(&text).map_err(ResolutionError::Invalid)?
            }
        };

        self.session.record("Duration", duration.to_string());
        Ok(duration)
    }

    /// `Ok(false)` when the user declined. Skipping counts as confirmed.
    pub async fn confirmation(
        &mut self,
        skip: bool,
        title: &str,
        message: &str,
    ) -> Result<bool, ResolutionError> {
        if skip {
            return Ok(true);
        }
        Ok(run_confirm(self.session, title, message).await?)
    }

    /// An existing time entry, fetched by id or picked from the most recent ones.
    pub async fn entry(
        &mut self,
        flag: Option<i64>,
        limit: u32,
    ) -> Result<TimeEntry, ResolutionError> {
        let entry = match flag {
            Some(id) => self
                .source
                .get_entry(id)
                .await
                .map_err(|err| ResolutionError::LoadFailed(format!("{err:#}")))?,
            None => {
                let source = self.source.clone();
                let params = ListParams::with_limit(limit);
                let item: EntryItem = run_selector(
                    self.session,
                    SelectorConfig::new("Select a Time Entry")
                        .empty_message("No time entries found.")
                        .loading_message("Loading time entries..."),
                    async move { source.list_entries(&params).await },
                )
                .await?;
                item.into_entry()
            }
        };

        self.session.record("Entry", entry.id.to_string());
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::app::keys::*;
    use crate::runtime::{ScriptedInput, TestSurface};
    use crossterm::event::{KeyCode, KeyEvent};
    use time::macros::date;

    const TODAY: Date = date!(2024 - 06 - 14);

    fn session(keys: impl IntoIterator<Item = KeyEvent>) -> Session<TestSurface, ScriptedInput> {
        Session::new(TestSurface::default(), ScriptedInput::new(keys))
    }

    #[tokio::test]
    async fn flags_skip_loaders_and_terminal() {
        let mock = Arc::new(MockApi::new());
        let mut session = session([]);
        let mut resolver = FieldResolver::new(&mut session, mock.clone(), TODAY);

        assert_eq!(resolver.project(Some(12)).await.unwrap(), 12);
        assert_eq!(resolver.task(Some(34), 12).await.unwrap(), 34);
        assert_eq!(
            resolver.date(Some(date!(2024 - 01 - 02))).await.unwrap(),
            date!(2024 - 01 - 02)
        );
        let duration = resolver
            .duration(Some(ParsedDuration { hours: 2.0 }))
            .await
            .unwrap();
        assert_eq!(duration.hours, 2.0);
        assert!(resolver.confirmation(true, "Create", "Sure?").await.unwrap());

        assert_eq!(mock.project_loads(), 0);
        assert_eq!(mock.task_loads(), 0);
        assert!(!session.is_open());
        assert_eq!(session.steps().len(), 4);
    }

    #[tokio::test]
    async fn selected_project_records_its_name() {
        let mock = Arc::new(MockApi::new());
        let mut session = session([key(KeyCode::Down), enter()]);
        let mut resolver = FieldResolver::new(&mut session, mock.clone(), TODAY);

        assert_eq!(resolver.project(None).await.unwrap(), 13);
        assert_eq!(mock.project_loads(), 1);
        assert_eq!(session.steps()[0].value, "Mobile App");
    }

    #[tokio::test]
    async fn tasks_are_loaded_for_resolved_project() {
        let mock = Arc::new(MockApi::new());
        let mut session = session([key(KeyCode::End), enter()]);
        let mut resolver = FieldResolver::new(&mut session, mock.clone(), TODAY);

        assert_eq!(resolver.task(None, 13).await.unwrap(), 37);
        assert_eq!(mock.task_loads(), 1);
    }

    #[tokio::test]
    async fn load_failure_is_not_a_cancellation() {
        let mock = Arc::new(MockApi {
            fail_projects: true,
            ..MockApi::new()
        });
        let mut session = session([enter()]);
        let mut resolver = FieldResolver::new(&mut session, mock, TODAY);

        let result = resolver.project(None).await;
        assert!(matches!(result, Err(ResolutionError::LoadFailed(cause)) if cause.contains("Unauthorized")));
    }

    #[tokio::test]
    async fn duration_reprompts_until_valid() {
        let mut keys = text("abc");
        keys.push(enter());
        keys.extend([key(KeyCode::Backspace); 3]);
        keys.extend(text("2h15m"));
        keys.push(enter());
        let mut session = session(keys);
        let mut resolver = FieldResolver::new(&mut session, Arc::new(MockApi::new()), TODAY);

        let duration = resolver.duration(None).await.unwrap();
        assert_eq!(duration.hours, 2.25);
        assert_eq!(session.steps()[0].value, "2h15m");
    }

    #[test]
    fn invalid_duration_keeps_parse_message() {
        let err = ResolutionError::Invalid(crate::duration::parse("abc").unwrap_err());
        assert_eq!(
            err.to_string(),
            "invalid duration \"abc\", use formats like 60m, 1h or 1h30m"
        );
    }

    #[tokio::test]
    async fn cancelled_duration_is_never_zero() {
        let mut keys = text("1h");
        keys.push(esc());
        let mut session = session(keys);
        let mut resolver = FieldResolver::new(&mut session, Arc::new(MockApi::new()), TODAY);

        assert!(matches!(
            resolver.duration(None).await,
            Err(ResolutionError::Cancelled)
        ));
        assert!(session.steps().is_empty());
    }

    #[tokio::test]
    async fn empty_date_resolves_to_today() {
        let mut session = session([enter()]);
        let mut resolver = FieldResolver::new(&mut session, Arc::new(MockApi::new()), TODAY);

        assert_eq!(resolver.date(None).await.unwrap(), TODAY);
        assert_eq!(session.steps()[0].value, "2024-06-14");
    }

    #[tokio::test]
    async fn declined_confirmation_is_false_not_error() {
        let mut session = session([ch('n')]);
        let mut resolver = FieldResolver::new(&mut session, Arc::new(MockApi::new()), TODAY);

        assert!(!resolver.confirmation(false, "Create", "Sure?").await.unwrap());
    }

    #[tokio::test]
    async fn entry_by_id_skips_selector() {
        let mock = Arc::new(MockApi::new());
        let mut session = session([]);
        let mut resolver = FieldResolver::new(&mut session, mock.clone(), TODAY);

        let entry = resolver.entry(Some(8), 10).await.unwrap();
        assert_eq!(entry.id, 8);
        assert_eq!(mock.entry_loads(), 0);
        assert!(!session.is_open());
    }

    #[tokio::test]
    async fn entry_is_picked_from_list() {
        let mock = Arc::new(MockApi::new());
        let mut session = session([key(KeyCode::Down), enter()]);
        let mut resolver = FieldResolver::new(&mut session, mock.clone(), TODAY);

        let entry = resolver.entry(None, 10).await.unwrap();
        assert_eq!(entry.id, 8);
        assert_eq!(mock.entry_loads(), 1);
    }
}
