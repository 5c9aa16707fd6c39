use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use harvest::{ListParams, TimeEntry, UpdateTimeEntry};

use crate::types::{CreatedEntry, EntryDraft, EntryItem, ProjectItem, TaskItem};

mod client;
mod dev_backend;
#[cfg(test)]
pub(crate) mod mock;

pub use client::HarvestApi;
pub use dev_backend::DevBackend;

/// Read side: everything a selector can load.
#[async_trait]
pub trait DataSource: Send + Sync + 'static {
    async fn list_assigned_projects(&self) -> Result<Vec<ProjectItem>>;

    async fn list_tasks(&self, project_id: i64) -> Result<Vec<TaskItem>>;

    async fn list_entries(&self, params: &ListParams) -> Result<Vec<EntryItem>>;

    async fn get_entry(&self, id: i64) -> Result<TimeEntry>;
}

/// Write side: creating, changing and deleting entries.
#[async_trait]
pub trait EntrySubmitter: Send + Sync + 'static {
    async fn create_entry(&self, draft: &EntryDraft) -> Result<CreatedEntry>;

    async fn update_entry(&self, id: i64, changes: &UpdateTimeEntry) -> Result<TimeEntry>;

    async fn delete_entry(&self, id: i64) -> Result<()>;
}

/// The two collaborators the commands run against.
#[derive(Clone)]
pub struct Collaborators {
    pub source: Arc<dyn DataSource>,
    pub submitter: Arc<dyn EntrySubmitter>,
}

impl Collaborators {
    pub fn from_backend<B: DataSource + EntrySubmitter>(backend: B) -> Self {
        let backend = Arc::new(backend);
        Self {
            source: backend.clone(),
            submitter: backend,
        }
    }
}
