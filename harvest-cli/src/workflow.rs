use thiserror::Error;
use time::Date;

use crate::api::Collaborators;
use crate::duration::ParsedDuration;
use crate::resolve::{FieldResolver, ResolutionError};
use crate::runtime::{InputSource, Session, Surface};
use crate::types::{CreatedEntry, EntryDraft};

/// Field values supplied up front. Anything left `None` is resolved interactively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryOptions {
    pub project: Option<i64>,
    pub task: Option<i64>,
    pub date: Option<Date>,
    pub duration: Option<ParsedDuration>,
    pub skip_confirmation: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    Submitted(CreatedEntry),
    Cancelled,
    Declined,
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Resolution(ResolutionError),
    #[error("Failed to create time entry: {0:#}")]
    Submission(anyhow::Error),
}

/// Resolves project, task, date and duration in that order, confirms, then submits once.
pub struct EntryWorkflow {
    collaborators: Collaborators,
    today: Date,
}

impl EntryWorkflow {
    pub fn new(collaborators: Collaborators, today: Date) -> Self {
        Self {
            collaborators,
            today,
        }
    }

    pub async fn run<S: Surface, I: InputSource>(
        &self,
        session: &mut Session<S, I>,
        options: &EntryOptions,
    ) -> Result<WorkflowOutcome, WorkflowError> {
        let draft = match self.resolve(session, options).await {
            Ok(Some(draft)) => draft,
            Ok(None) => {
                tracing::debug!("entry declined at confirmation");
                return Ok(WorkflowOutcome::Declined);
            }
            Err(ResolutionError::Cancelled) => {
                tracing::debug!("entry workflow cancelled");
                return Ok(WorkflowOutcome::Cancelled);
            }
            Err(err) => return Err(WorkflowError::Resolution(err)),
        };

        tracing::debug!(?draft, "submitting time entry");
        let created = self
            .collaborators
            .submitter
            .create_entry(&draft)
            .await
            .map_err(WorkflowError::Submission)?;

        tracing::info!(entry_id = created.id, "time entry created");
        Ok(WorkflowOutcome::Submitted(created))
    }

    async fn resolve<S: Surface, I: InputSource>(
        &self,
        session: &mut Session<S, I>,
        options: &EntryOptions,
    ) -> Result<Option<EntryDraft>, ResolutionError> {
        let mut resolver =
            FieldResolver::new(session, self.collaborators.source.clone(), self.today);

        let project_id = resolver.project(options.project).await?;
        let task_id = resolver.task(options.task, project_id).await?;
        let date = resolver.date(options.date).await?;
        let duration = resolver.duration(options.duration).await?;

        let confirmed = resolver
            .confirmation(
                options.skip_confirmation,
                "Create Time Entry",
                "Create this time entry?",
            )
            .await?;
        if !confirmed {
            return Ok(None);
        }

        Ok(Some(EntryDraft {
            project_id,
            task_id,
            date,
            hours: duration.hours,
        }))
    }
}
