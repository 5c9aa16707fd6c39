use clap::{Args, Parser, Subcommand};
use harvest::UpdateTimeEntry;
use time::Date;

use crate::duration::ParsedDuration;
use crate::output::OutputFormat;
use crate::time_utils::{format_date, parse_date};
use crate::workflow::EntryOptions;

#[derive(Debug, Parser)]
#[command(name = "harvest", version)]
#[command(about = "Log time to Harvest from the terminal")]
pub struct Cli {
    /// Run against local in-memory sample data instead of the Harvest API
    #[arg(long, global = true)]
    pub dev: bool,

    /// Write debug logs to the log file
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the Harvest API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the HTTP request timeout
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create, view, edit and delete time entries
    #[command(subcommand)]
    Entry(EntryCommand),
    /// Manage the config file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
pub enum EntryCommand {
    /// Create a time entry, asking for anything not given as a flag
    Create(CreateArgs),
    /// Show a time entry, or list recent ones with --list
    View(ViewArgs),
    /// Change fields of an existing time entry
    Edit(EditArgs),
    /// Delete a time entry
    Delete(DeleteArgs),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactively write account id and token to the config file
    Init,
    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Project id
    #[arg(long)]
    pub project: Option<i64>,

    /// Task id
    #[arg(long)]
    pub task: Option<i64>,

    /// Date of the entry (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<Date>,

    /// Time spent, e.g. 90m, 1.5h or 1h30m
    #[arg(long)]
    pub duration: Option<ParsedDuration>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl CreateArgs {
    pub fn into_options(self) -> EntryOptions {
        EntryOptions {
            project: self.project,
            task: self.task,
            date: self.date,
            duration: self.duration,
            skip_confirmation: self.yes,
        }
    }
}

#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Entry id. Pick from recent entries when omitted
    pub id: Option<i64>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// How many recent entries to offer, or to print with --list
    #[arg(short, long, default_value_t = 50)]
    pub limit: u32,

    /// Print recent entries instead of picking one
    #[arg(long, conflicts_with = "id")]
    pub list: bool,

    /// Page of results to print with --list
    #[arg(long, requires = "list", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// Only print entries whose title or details contain this text
    #[arg(long, requires = "list")]
    pub filter: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Entry id. Pick from recent entries when omitted
    pub id: Option<i64>,

    #[command(flatten)]
    pub changes: ChangeArgs,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// How many recent entries to offer
    #[arg(long, default_value_t = 50)]
    pub limit: u32,
}

/// Fields to change. At least one is required; the rest are left as they are.
#[derive(Debug, Clone, Default, Args)]
#[group(required = true, multiple = true)]
pub struct ChangeArgs {
    /// New project id
    #[arg(long)]
    pub project: Option<i64>,

    /// New task id
    #[arg(long)]
    pub task: Option<i64>,

    /// New date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<Date>,

    /// New time spent, e.g. 90m, 1.5h or 1h30m
    #[arg(long)]
    pub duration: Option<ParsedDuration>,
}

impl ChangeArgs {
    pub fn to_update(&self) -> UpdateTimeEntry {
        UpdateTimeEntry {
            project_id: self.project,
            task_id: self.task,
            spent_date: self.date,
            hours: self.duration.map(|d| d.hours),
        }
    }

    /// Human-readable list of the changes, e.g. `date 2024-06-14, duration 2h`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(project) = self.project {
            parts.push(format!("project {}", project));
        }
        if let Some(task) = self.task {
            parts.push(format!("task {}", task));
        }
        if let Some(date) = self.date {
            parts.push(format!("date {}", format_date(date)));
        }
        if let Some(duration) = self.duration {
            parts.push(format!("duration {}", duration));
        }
        parts.join(", ")
    }
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Entry id. Pick from recent entries when omitted
    pub id: Option<i64>,

    /// Delete without asking for confirmation
    #[arg(short, long)]
    pub force: bool,

    /// How many recent entries to offer
    #[arg(long, default_value_t = 50)]
    pub limit: u32,
}

fn parse_date_arg(value: &str) -> Result<Date, String> {
    parse_date(value).map_err(|_| format!("invalid date {:?}, use YYYY-MM-DD", value))
}
