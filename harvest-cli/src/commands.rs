use std::path::Path;

use anyhow::{bail, Context, Result};
use harvest::{ListParams, TimeEntry};

use crate::api::Collaborators;
use crate::app::{matches_filter, TextPromptConfig};
use crate::cli::{DeleteArgs, EditArgs, ViewArgs};
use crate::config::HarvestConfig;
use crate::resolve::{FieldResolver, ResolutionError};
use crate::runtime::{run_text_prompt, InputSource, PromptError, Session, Surface};
use crate::time_utils::{format_date, today_local};
use crate::types::EntryItem;
use crate::workflow::{EntryOptions, EntryWorkflow, WorkflowOutcome};

const TOKEN_CHAR_LIMIT: usize = 128;

/// How an interactive command ended, when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome<T> {
    Done(T),
    Cancelled,
    Declined,
}

fn cancelled_or<T>(err: ResolutionError) -> Result<CommandOutcome<T>> {
    match err {
        ResolutionError::Cancelled => Ok(CommandOutcome::Cancelled),
        err => Err(err.into()),
    }
}

pub async fn create_entry<S: Surface, I: InputSource>(
    session: &mut Session<S, I>,
    collaborators: &Collaborators,
    options: &EntryOptions,
) -> Result<WorkflowOutcome> {
    let workflow = EntryWorkflow::new(collaborators.clone(), today_local());
    Ok(workflow.run(session, options).await?)
}

pub async fn view_entry<S: Surface, I: InputSource>(
    session: &mut Session<S, I>,
    collaborators: &Collaborators,
    args: &ViewArgs,
) -> Result<CommandOutcome<TimeEntry>> {
    let mut resolver = FieldResolver::new(session, collaborators.source.clone(), today_local());
    match resolver.entry(args.id, args.limit).await {
        Ok(entry) => Ok(CommandOutcome::Done(entry)),
        Err(err) => cancelled_or(err),
    }
}

/// Recent entries for `entry view --list`. Never touches the terminal.
pub async fn list_entries(
    collaborators: &Collaborators,
    args: &ViewArgs,
) -> Result<Vec<TimeEntry>> {
    let params = ListParams {
        page: args.page,
        ..ListParams::with_limit(args.limit)
    };
    let needle = args.filter.as_deref().unwrap_or_default().trim().to_lowercase();

    let items = collaborators.source.list_entries(&params).await?;
    Ok(items
        .into_iter()
        .filter(|item| matches_filter(item, &needle))
        .map(EntryItem::into_entry)
        .collect())
}

pub async fn edit_entry<S: Surface, I: InputSource>(
    session: &mut Session<S, I>,
    collaborators: &Collaborators,
    args: &EditArgs,
) -> Result<CommandOutcome<TimeEntry>> {
    let changes = args.changes.to_update();
    if changes.is_empty() {
        bail!("Nothing to change, pass at least one of --project, --task, --date or --duration");
    }

    let mut resolver = FieldResolver::new(session, collaborators.source.clone(), today_local());

    let entry = match resolver.entry(args.id, args.limit).await {
        Ok(entry) => entry,
        Err(err) => return cancelled_or(err),
    };

    let message = format!("Set {} on entry {}?", args.changes.summary(), entry.id);
    match resolver
        .confirmation(args.yes, "Edit Time Entry", &message)
        .await
    {
        Ok(true) => {}
        Ok(false) => return Ok(CommandOutcome::Declined),
        Err(err) => return cancelled_or(err),
    }

    let updated = collaborators
        .submitter
        .update_entry(entry.id, &changes)
        .await?;
    tracing::info!(entry_id = updated.id, ?changes, "time entry updated");
    Ok(CommandOutcome::Done(updated))
}

pub async fn delete_entry<S: Surface, I: InputSource>(
    session: &mut Session<S, I>,
    collaborators: &Collaborators,
    args: &DeleteArgs,
) -> Result<CommandOutcome<TimeEntry>> {
    let mut resolver = FieldResolver::new(session, collaborators.source.clone(), today_local());

    let entry = match resolver.entry(args.id, args.limit).await {
        Ok(entry) => entry,
        Err(err) => return cancelled_or(err),
    };

    let message = format!(
        "Delete {} · {} · {:.2}h ({})?",
        entry.project.name,
        entry.task.name,
        entry.hours,
        format_date(entry.spent_date)
    );
    match resolver
        .confirmation(args.force, "Delete Time Entry", &message)
        .await
    {
        Ok(true) => {}
        Ok(false) => return Ok(CommandOutcome::Declined),
        Err(err) => return cancelled_or(err),
    }

    collaborators.submitter.delete_entry(entry.id).await?;
    tracing::info!(entry_id = entry.id, "time entry deleted");
    Ok(CommandOutcome::Done(entry))
}

/// Ask for account id and token, pre-filled from `existing`, and write them to `path`.
pub async fn init_config<S: Surface, I: InputSource>(
    session: &mut Session<S, I>,
    existing: HarvestConfig,
    path: &Path,
) -> Result<CommandOutcome<HarvestConfig>> {
    let account_id = TextPromptConfig::new("Harvest Account", "Account ID:")
        .placeholder("123456")
        .required()
        .default_value(existing.account_id.clone())
        .validate(|value| {
            if value.chars().all(|c| c.is_ascii_digit()) {
                Ok(())
            } else {
                Err("account id must contain only digits".to_string())
            }
        });
    let account_id = match run_text_prompt(session, account_id).await {
        Ok(value) => value,
        Err(PromptError::Cancelled) => return Ok(CommandOutcome::Cancelled),
        Err(err) => return Err(err.into()),
    };
    session.record("Account ID", account_id.clone());

    let token = TextPromptConfig::new("Harvest Token", "Personal access token:")
        .required()
        .password()
        .char_limit(TOKEN_CHAR_LIMIT)
        .default_value(existing.token.clone());
    let token = match run_text_prompt(session, token).await {
        Ok(value) => value,
        Err(PromptError::Cancelled) => return Ok(CommandOutcome::Cancelled),
        Err(err) => return Err(err.into()),
    };
    session.record("Token", "••••••••");

    let config = HarvestConfig {
        account_id,
        token,
        ..existing
    };
    config
        .save_to(path)
        .with_context(|| format!("Failed to save config to {}", path.display()))?;
    Ok(CommandOutcome::Done(config))
}
