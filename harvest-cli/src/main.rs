mod api;
mod app;
mod cli;
mod commands;
mod config;
mod duration;
mod logging;
mod output;
mod resolve;
mod runtime;
mod time_utils;
mod types;
mod ui;
mod workflow;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use api::{Collaborators, DevBackend, HarvestApi};
use cli::{Cli, Commands, ConfigCommand, EntryCommand};
use commands::CommandOutcome;
use crate::config::{HarvestConfig, Overrides};
use output::OutputFormat;
use workflow::WorkflowOutcome;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    config::load_dotenv();
    if let Err(err) = logging::init(cli.verbose) {
        eprintln!("Warning: {:#}", err);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            output::print_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let overrides = Overrides {
        api_url: cli.api_url,
        timeout_secs: cli.timeout,
    };

    match cli.command {
        Commands::Config(ConfigCommand::Path) => {
            println!("{}", HarvestConfig::config_path()?.display());
            Ok(())
        }
        Commands::Config(ConfigCommand::Init) => config_init().await,
        Commands::Entry(command) => {
            let collaborators = connect(cli.dev, &overrides)?;
            entry(command, &collaborators).await
        }
    }
}

fn connect(dev: bool, overrides: &Overrides) -> Result<Collaborators> {
    if dev {
        tracing::info!("using in-memory dev backend");
        return Ok(Collaborators::from_backend(DevBackend::new()));
    }

    let config = HarvestConfig::load(overrides)?;
    tracing::debug!(?config, "loaded config");
    let api = HarvestApi::new(&config.credentials()?, &config.api_url, config.timeout())?;
    Ok(Collaborators::from_backend(api))
}

async fn entry(command: EntryCommand, collaborators: &Collaborators) -> Result<()> {
    if let EntryCommand::View(args) = &command {
        if args.list {
            let entries = commands::list_entries(collaborators, args).await?;
            return output::print_entries(&entries, args.format);
        }
    }

    let mut session = runtime::terminal_session();

    match command {
        EntryCommand::Create(args) => {
            let result =
                commands::create_entry(&mut session, collaborators, &args.into_options()).await;
            output::print_steps(&session.finish()?);
            match result? {
                WorkflowOutcome::Submitted(created) => {
                    output::print_success(&output::created_message(&created))
                }
                WorkflowOutcome::Cancelled => {
                    output::print_notice("Cancelled, no time entry was created.")
                }
                WorkflowOutcome::Declined => output::print_notice("Time entry not created."),
            }
        }
        EntryCommand::View(args) => {
            let result = commands::view_entry(&mut session, collaborators, &args).await;
            session.finish()?;
            match result? {
                CommandOutcome::Done(entry) => output::print_entry(&entry, args.format)?,
                CommandOutcome::Cancelled | CommandOutcome::Declined => {
                    output::print_notice("Cancelled.")
                }
            }
        }
        EntryCommand::Edit(args) => {
            let result = commands::edit_entry(&mut session, collaborators, &args).await;
            output::print_steps(&session.finish()?);
            match result? {
                CommandOutcome::Done(entry) => {
                    output::print_success(&format!("Updated time entry {}.", entry.id));
                    output::print_entry(&entry, OutputFormat::Table)?;
                }
                CommandOutcome::Cancelled => {
                    output::print_notice("Cancelled, nothing was changed.")
                }
                CommandOutcome::Declined => output::print_notice("Time entry left unchanged."),
            }
        }
        EntryCommand::Delete(args) => {
            let result = commands::delete_entry(&mut session, collaborators, &args).await;
            output::print_steps(&session.finish()?);
            match result? {
                CommandOutcome::Done(entry) => {
                    output::print_success(&format!("Deleted time entry {}.", entry.id))
                }
                CommandOutcome::Cancelled => {
                    output::print_notice("Cancelled, nothing was deleted.")
                }
                CommandOutcome::Declined => output::print_notice("Time entry kept."),
            }
        }
    }

    Ok(())
}

async fn config_init() -> Result<()> {
    let path = HarvestConfig::config_path()?;
    let existing = HarvestConfig::load_file_or_default(&path);

    let mut session = runtime::terminal_session();
    let result = commands::init_config(&mut session, existing, &path).await;
    output::print_steps(&session.finish()?);

    match result? {
        CommandOutcome::Done(_) => {
            output::print_success(&format!("Config written to {}", path.display()))
        }
        CommandOutcome::Cancelled | CommandOutcome::Declined => {
            output::print_notice("Cancelled, config unchanged.")
        }
    }
    Ok(())
}
