use harvest::{ProjectAssignment, TaskAssignment, TimeEntry};
use time::Date;

use crate::time_utils::format_date;

/// A record that can be listed and picked in a selector.
pub trait SelectableItem: Clone + Send + 'static {
    fn identifier(&self) -> String;
    fn title(&self) -> &str;
    fn description(&self) -> String;
}

/// A project the user is assigned to.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectItem(pub ProjectAssignment);

impl ProjectItem {
    pub fn project_id(&self) -> i64 {
        self.0.project.id
    }
}

impl SelectableItem for ProjectItem {
    fn identifier(&self) -> String {
        self.0.project.id.to_string()
    }

    fn title(&self) -> &str {
        &self.0.project.name
    }

    fn description(&self) -> String {
        format!("ID: {} | Client: {}", self.0.project.id, self.0.client.name)
    }
}

/// A task assignable on a project.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskItem(pub TaskAssignment);

impl TaskItem {
    pub fn task_id(&self) -> i64 {
        self.0.task.id
    }
}

impl SelectableItem for TaskItem {
    fn identifier(&self) -> String {
        self.0.task.id.to_string()
    }

    fn title(&self) -> &str {
        &self.0.task.name
    }

    fn description(&self) -> String {
        let billable = if self.0.billable { " | Billable" } else { "" };
        format!("ID: {}{}", self.0.task.id, billable)
    }
}

/// A previously logged time entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryItem {
    entry: TimeEntry,
    title: String,
}

impl EntryItem {
    pub fn new(entry: TimeEntry) -> Self {
        let title = match entry.notes.as_deref().map(str::trim) {
            Some(notes) if !notes.is_empty() => format!("{} · {}", entry.project.name, notes),
            _ => format!("{} · {}", entry.project.name, entry.task.name),
        };
        Self { entry, title }
    }

    pub fn into_entry(self) -> TimeEntry {
        self.entry
    }
}

impl SelectableItem for EntryItem {
    fn identifier(&self) -> String {
        self.entry.id.to_string()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> String {
        format!(
            "ID: {} | {} | {:.2}h | {}",
            self.entry.id,
            format_date(self.entry.spent_date),
            self.entry.hours,
            self.entry.task.name
        )
    }
}

/// A fully resolved entry, ready for submission.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub project_id: i64,
    pub task_id: i64,
    pub date: Date,
    pub hours: f64,
}

/// A resolved field, shown in the header of later widgets and printed at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub label: String,
    pub value: String,
}

impl Step {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// What the submission collaborator returns for a created entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedEntry {
    pub id: i64,
    pub project_name: String,
    pub task_name: String,
    pub date: Date,
    pub hours: f64,
}

impl From<TimeEntry> for CreatedEntry {
    fn from(entry: TimeEntry) -> Self {
        Self {
            id: entry.id,
            project_name: entry.project.name,
            task_name: entry.task.name,
            date: entry.spent_date,
            hours: entry.hours,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use harvest::{ClientRef, ProjectRef, TaskRef};
    use time::macros::date;

    use super::*;

    pub fn project(id: i64, name: &str, client: &str, tasks: &[(i64, &str)]) -> ProjectAssignment {
        ProjectAssignment {
            id: id * 10,
            is_active: true,
            project: ProjectRef {
                id,
                name: name.to_string(),
                code: None,
            },
            client: ClientRef {
                id: 1,
                name: client.to_string(),
            },
            task_assignments: tasks.iter().map(|(id, name)| task(*id, name)).collect(),
        }
    }

    pub fn task(id: i64, name: &str) -> TaskAssignment {
        TaskAssignment {
            id: id * 10,
            billable: true,
            is_active: true,
            task: TaskRef {
                id,
                name: name.to_string(),
            },
        }
    }

    pub fn entry(id: i64, notes: Option<&str>) -> TimeEntry {
        TimeEntry {
            id,
            spent_date: date!(2024 - 03 - 01),
            hours: 1.25,
            notes: notes.map(str::to_string),
            is_running: false,
            project: ProjectRef {
                id: 12,
                name: "Website".to_string(),
                code: None,
            },
            task: TaskRef {
                id: 34,
                name: "Design".to_string(),
            },
            client: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn project_item_exposes_project_identity() {
        let item = ProjectItem(project(12, "Website", "ABC Corp", &[]));
        assert_eq!(item.identifier(), "12");
        assert_eq!(item.title(), "Website");
        assert_eq!(item.description(), "ID: 12 | Client: ABC Corp");
    }

    #[test]
    fn task_item_uses_task_id_not_assignment_id() {
        let item = TaskItem(task(34, "Design"));
        assert_eq!(item.identifier(), "34");
        assert_eq!(item.task_id(), 34);
    }

    #[test]
    fn entry_item_title_prefers_notes() {
        let with_notes = EntryItem::new(entry(1, Some("Landing page")));
        assert_eq!(with_notes.title(), "Website · Landing page");

        let without_notes = EntryItem::new(entry(2, Some("  ")));
        assert_eq!(without_notes.title(), "Website · Design");
    }

    #[test]
    fn entry_item_description_has_date_and_hours() {
        let item = EntryItem::new(entry(7, None));
        assert_eq!(item.description(), "ID: 7 | 2024-03-01 | 1.25h | Design");
    }
}
