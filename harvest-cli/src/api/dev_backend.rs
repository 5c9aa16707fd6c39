use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use harvest::{
    ClientRef, ListParams, ProjectAssignment, ProjectRef, TaskAssignment, TaskRef, TimeEntry,
    UpdateTimeEntry,
};
use time::Duration;

use super::{DataSource, EntrySubmitter};
use crate::time_utils::today_local;
use crate::types::{CreatedEntry, EntryDraft, EntryItem, ProjectItem, TaskItem};

/// In-memory backend with sample data, used with `--dev`.
#[derive(Debug, Clone)]
pub struct DevBackend {
    projects: Arc<Vec<ProjectAssignment>>,
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug)]
struct DevStore {
    next_id: i64,
    entries: Vec<TimeEntry>,
}

impl DevBackend {
    pub fn new() -> Self {
        let projects = seed_projects();
        let entries = seed_entries(&projects);
        let next_id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            projects: Arc::new(projects),
            store: Arc::new(Mutex::new(DevStore { next_id, entries })),
        }
    }

    fn find_task(&self, project_id: i64, task_id: i64) -> Option<(&ProjectAssignment, &TaskRef)> {
        let project = self.projects.iter().find(|p| p.project.id == project_id)?;
        let task = project
            .task_assignments
            .iter()
            .find(|t| t.task.id == task_id)?;
        Some((project, &task.task))
    }
}

impl Default for DevBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataSource for DevBackend {
    async fn list_assigned_projects(&self) -> Result<Vec<ProjectItem>> {
        Ok(self.projects.iter().cloned().map(ProjectItem).collect())
    }

    async fn list_tasks(&self, project_id: i64) -> Result<Vec<TaskItem>> {
        Ok(self
            .projects
            .iter()
            .find(|p| p.project.id == project_id)
            .map(|p| p.task_assignments.iter().cloned().map(TaskItem).collect())
            .unwrap_or_default())
    }

    async fn list_entries(&self, params: &ListParams) -> Result<Vec<EntryItem>> {
        let store = self.store.lock().expect("dev store lock poisoned");
        let limit = params.per_page.unwrap_or(100) as usize;
        let skip = params.page.unwrap_or(1).saturating_sub(1) as usize * limit;

        let mut entries: Vec<TimeEntry> = store
            .entries
            .iter()
            .filter(|e| params.from.is_none_or(|from| e.spent_date >= from))
            .filter(|e| params.to.is_none_or(|to| e.spent_date <= to))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.spent_date.cmp(&a.spent_date).then(b.id.cmp(&a.id)));

        Ok(entries
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(EntryItem::new)
            .collect())
    }

    async fn get_entry(&self, id: i64) -> Result<TimeEntry> {
        self.store
            .lock()
            .expect("dev store lock poisoned")
            .entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("Time entry {} not found", id))
    }
}

#[async_trait]
impl EntrySubmitter for DevBackend {
    async fn create_entry(&self, draft: &EntryDraft) -> Result<CreatedEntry> {
        let (project, task) = self
            .find_task(draft.project_id, draft.task_id)
            .ok_or_else(|| {
                anyhow!(
                    "Task {} is not assigned on project {}",
                    draft.task_id,
                    draft.project_id
                )
            })?;

        let mut store = self.store.lock().expect("dev store lock poisoned");
        let entry = TimeEntry {
            id: store.next_id,
            spent_date: draft.date,
            hours: draft.hours,
            notes: None,
            is_running: false,
            project: project.project.clone(),
            task: task.clone(),
            client: Some(project.client.clone()),
        };
        store.next_id += 1;
        store.entries.push(entry.clone());

        Ok(entry.into())
    }

    async fn update_entry(&self, id: i64, changes: &UpdateTimeEntry) -> Result<TimeEntry> {
        let mut store = self.store.lock().expect("dev store lock poisoned");
        let entry = store
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| anyhow!("Time entry {} not found", id))?;

        let project_id = changes.project_id.unwrap_or(entry.project.id);
        let task_id = changes.task_id.unwrap_or(entry.task.id);
        let (project, task) = self.find_task(project_id, task_id).ok_or_else(|| {
            anyhow!("Task {} is not assigned on project {}", task_id, project_id)
        })?;

        entry.project = project.project.clone();
        entry.task = task.clone();
        entry.client = Some(project.client.clone());
        if let Some(date) = changes.spent_date {
            entry.spent_date = date;
        }
        if let Some(hours) = changes.hours {
            entry.hours = hours;
        }

        Ok(entry.clone())
    }

    async fn delete_entry(&self, id: i64) -> Result<()> {
        let mut store = self.store.lock().expect("dev store lock poisoned");
        let before = store.entries.len();
        store.entries.retain(|e| e.id != id);
        if store.entries.len() == before {
            return Err(anyhow!("Time entry {} not found", id));
        }
        Ok(())
    }
}

fn seed_projects() -> Vec<ProjectAssignment> {
    let client = |id: i64, name: &str| ClientRef {
        id,
        name: name.to_string(),
    };
    let task = |id: i64, name: &str, billable: bool| TaskAssignment {
        id: id + 1000,
        billable,
        is_active: true,
        task: TaskRef {
            id,
            name: name.to_string(),
        },
    };
    let project = |id: i64, name: &str, client: ClientRef, tasks: Vec<TaskAssignment>| {
        ProjectAssignment {
            id: id + 1000,
            is_active: true,
            project: ProjectRef {
                id,
                name: name.to_string(),
                code: None,
            },
            client,
            task_assignments: tasks,
        }
    };

    vec![
        project(
            12,
            "Website Redesign",
            client(1, "ABC Corp"),
            vec![
                task(34, "Design", true),
                task(35, "Development", true),
                task(36, "Project Management", false),
            ],
        ),
        project(
            13,
            "Mobile App",
            client(2, "XYZ Inc"),
            vec![task(35, "Development", true), task(37, "Testing", true)],
        ),
        project(
            14,
            "Internal",
            client(3, "Acme Consulting"),
            vec![task(38, "Meetings", false), task(39, "Training", false)],
        ),
    ]
}

fn seed_entries(projects: &[ProjectAssignment]) -> Vec<TimeEntry> {
    let today = today_local();
    let mut entries = Vec::new();

    let samples = [
        (0, 0, 0, 1.5, "Landing page mockups"),
        (1, 0, 1, 3.0, "Navigation component"),
        (2, 1, 0, 2.25, "Push notifications"),
        (3, 2, 0, 0.5, "Weekly sync"),
        (4, 1, 1, 1.0, ""),
    ];

    for (i, (days_ago, project_idx, task_idx, hours, notes)) in samples.into_iter().enumerate() {
        let Some(project) = projects.get(project_idx) else {
            continue;
        };
        let Some(task) = project.task_assignments.get(task_idx) else {
            continue;
        };
        entries.push(TimeEntry {
            id: 1000 + i as i64,
            spent_date: today - Duration::days(days_ago),
            hours,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            is_running: false,
            project: project.project.clone(),
            task: task.task.clone(),
            client: Some(project.client.clone()),
        });
    }

    entries
}
