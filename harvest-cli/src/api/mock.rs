use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use harvest::{ListParams, ProjectAssignment, TimeEntry, UpdateTimeEntry};

use super::{DataSource, EntrySubmitter};
use crate::types::fixtures::{entry, project};
use crate::types::{CreatedEntry, EntryDraft, EntryItem, ProjectItem, TaskItem};

/// Test double that records every call.
#[derive(Debug)]
pub struct MockApi {
    pub projects: Vec<ProjectAssignment>,
    pub entries: Vec<TimeEntry>,
    pub fail_projects: bool,
    pub fail_create: bool,
    pub project_loads: AtomicUsize,
    pub task_loads: AtomicUsize,
    pub entry_loads: AtomicUsize,
    pub created: Mutex<Vec<EntryDraft>>,
    pub updated: Mutex<Vec<(i64, UpdateTimeEntry)>>,
    pub deleted: Mutex<Vec<i64>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            projects: vec![
                project(12, "Website", "ABC Corp", &[(34, "Design"), (35, "Development")]),
                project(13, "Mobile App", "XYZ Inc", &[(35, "Development"), (37, "Testing")]),
            ],
            entries: vec![entry(7, Some("Landing page")), entry(8, None)],
            fail_projects: false,
            fail_create: false,
            project_loads: AtomicUsize::new(0),
            task_loads: AtomicUsize::new(0),
            entry_loads: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn project_loads(&self) -> usize {
        self.project_loads.load(Ordering::SeqCst)
    }

    pub fn task_loads(&self) -> usize {
        self.task_loads.load(Ordering::SeqCst)
    }

    pub fn entry_loads(&self) -> usize {
        self.entry_loads.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> Vec<EntryDraft> {
        self.created.lock().unwrap().clone()
    }

    pub fn updated(&self) -> Vec<(i64, UpdateTimeEntry)> {
        self.updated.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<i64> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataSource for MockApi {
    async fn list_assigned_projects(&self) -> Result<Vec<ProjectItem>> {
        self.project_loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_projects {
            return Err(anyhow!("Unauthorized: check the Harvest token and account id"));
        }
        Ok(self.projects.iter().cloned().map(ProjectItem).collect())
    }

    async fn list_tasks(&self, project_id: i64) -> Result<Vec<TaskItem>> {
        self.task_loads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .projects
            .iter()
            .find(|p| p.project.id == project_id)
            .map(|p| p.task_assignments.iter().cloned().map(TaskItem).collect())
            .unwrap_or_default())
    }

    async fn list_entries(&self, _params: &ListParams) -> Result<Vec<EntryItem>> {
        self.entry_loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.iter().cloned().map(EntryItem::new).collect())
    }

    async fn get_entry(&self, id: i64) -> Result<TimeEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("Not found: time entry {}", id))
    }
}

#[async_trait]
impl EntrySubmitter for MockApi {
    async fn create_entry(&self, draft: &EntryDraft) -> Result<CreatedEntry> {
        self.created.lock().unwrap().push(draft.clone());
        if self.fail_create {
            return Err(anyhow!("Harvest API returned 422: task is archived"));
        }
        Ok(CreatedEntry {
            id: 999,
            project_name: format!("Project {}", draft.project_id),
            task_name: format!("Task {}", draft.task_id),
            date: draft.date,
            hours: draft.hours,
        })
    }

    async fn update_entry(&self, id: i64, changes: &UpdateTimeEntry) -> Result<TimeEntry> {
        self.updated.lock().unwrap().push((id, changes.clone()));
        let mut entry = self.get_entry(id).await?;
        if let Some(project_id) = changes.project_id {
            entry.project.id = project_id;
        }
        if let Some(task_id) = changes.task_id {
            entry.task.id = task_id;
        }
        if let Some(date) = changes.spent_date {
            entry.spent_date = date;
        }
        if let Some(hours) = changes.hours {
            entry.hours = hours;
        }
        Ok(entry)
    }

    async fn delete_entry(&self, id: i64) -> Result<()> {
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }
}
