use anyhow::{Context, Result};
use clap::ValueEnum;
use crossterm::style::Stylize;
use harvest::TimeEntry;

use crate::time_utils::format_date;
use crate::types::{CreatedEntry, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn print_steps(steps: &[Step]) {
    for step in steps {
        println!("{} {}", format!("{}:", step.label).cyan(), step.value);
    }
}

pub fn print_success(message: &str) {
    println!("{}", message.green());
}

pub fn print_notice(message: &str) {
    println!("{}", message.yellow());
}

pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);
}

pub fn created_message(entry: &CreatedEntry) -> String {
    format!(
        "Created time entry {}: {:.2}h on {} / {} for {}",
        entry.id,
        entry.hours,
        entry.project_name,
        entry.task_name,
        format_date(entry.date)
    )
}

pub fn print_entry(entry: &TimeEntry, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print!("{}", entry_table(entry)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(entry).context("Failed to serialize time entry")?
        ),
    }
    Ok(())
}

pub fn print_entries(entries: &[TimeEntry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table if entries.is_empty() => print_notice("No time entries found."),
        OutputFormat::Table => print!("{}", entries_table(entries)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(entries).context("Failed to serialize time entries")?
        ),
    }
    Ok(())
}

/// One row per entry with columns padded to the widest cell.
fn entries_table(entries: &[TimeEntry]) -> String {
    let header = ["ID", "Date", "Project", "Task", "Hours", "Notes"].map(String::from);
    let rows: Vec<[String; 6]> = entries
        .iter()
        .map(|entry| {
            [
                entry.id.to_string(),
                format_date(entry.spent_date),
                entry.project.name.clone(),
                entry.task.name.clone(),
                format!("{:.2}", entry.hours),
                entry.notes.clone().unwrap_or_default(),
            ]
        })
        .collect();

    let mut widths = header.clone().map(|cell| cell.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    std::iter::once(&header)
        .chain(&rows)
        .map(|row| {
            let line = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ");
            format!("{}\n", line.trim_end())
        })
        .collect()
}

fn entry_table(entry: &TimeEntry) -> String {
    let client = entry
        .client
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("-");
    let notes = entry
        .notes
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("-");

    let rows = [
        ("ID", entry.id.to_string()),
        ("Date", format_date(entry.spent_date)),
        ("Client", client.to_string()),
        ("Project", entry.project.name.clone()),
        ("Task", entry.task.name.clone()),
        ("Hours", format!("{:.2}", entry.hours)),
        ("Notes", notes.to_string()),
        ("Running", if entry.is_running { "yes" } else { "no" }.to_string()),
    ];

    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{:<width$}  {}\n", label, value, width = width))
        .collect()
}
