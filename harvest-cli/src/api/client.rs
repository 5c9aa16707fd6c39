use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use harvest::{
    CreateTimeEntry, HarvestClient, HarvestCredentials, ListParams, TimeEntry, UpdateTimeEntry,
};

use super::{DataSource, EntrySubmitter};
use crate::types::{CreatedEntry, EntryDraft, EntryItem, ProjectItem, TaskItem};

/// Collaborators backed by the Harvest v2 REST API.
#[derive(Debug, Clone)]
pub struct HarvestApi {
    client: HarvestClient,
}

impl HarvestApi {
    pub fn new(credentials: &HarvestCredentials, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = HarvestClient::new(credentials, base_url, timeout)
            .with_context(|| format!("Failed to build Harvest client for {}", base_url))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DataSource for HarvestApi {
    async fn list_assigned_projects(&self) -> Result<Vec<ProjectItem>> {
        let assignments = self
            .client
            .list_project_assignments()
            .await
            .context("Failed to fetch projects")?;
        Ok(assignments.into_iter().map(ProjectItem).collect())
    }

    async fn list_tasks(&self, project_id: i64) -> Result<Vec<TaskItem>> {
        let tasks = self
            .client
            .list_task_assignments(project_id)
            .await
            .with_context(|| format!("Failed to fetch tasks for project {}", project_id))?;
        Ok(tasks.into_iter().map(TaskItem).collect())
    }

    async fn list_entries(&self, params: &ListParams) -> Result<Vec<EntryItem>> {
        let entries = self
            .client
            .list_time_entries(params)
            .await
            .context("Failed to fetch time entries")?;
        Ok(entries.into_iter().map(EntryItem::new).collect())
    }

    async fn get_entry(&self, id: i64) -> Result<TimeEntry> {
        self.client
            .get_time_entry(id)
            .await
            .with_context(|| format!("Failed to fetch time entry {}", id))
    }
}

#[async_trait]
impl EntrySubmitter for HarvestApi {
    async fn create_entry(&self, draft: &EntryDraft) -> Result<CreatedEntry> {
        let request = CreateTimeEntry {
            project_id: draft.project_id,
            task_id: draft.task_id,
            spent_date: draft.date,
            hours: draft.hours,
        };
        let entry = self
            .client
            .create_time_entry(&request)
            .await
            .context("Failed to create time entry")?;
        Ok(entry.into())
    }

    async fn update_entry(&self, id: i64, changes: &UpdateTimeEntry) -> Result<TimeEntry> {
        self.client
            .update_time_entry(id, changes)
            .await
            .with_context(|| format!("Failed to update time entry {}", id))
    }

    async fn delete_entry(&self, id: i64) -> Result<()> {
        self.client
            .delete_time_entry(id)
            .await
            .with_context(|| format!("Failed to delete time entry {}", id))
    }
}
