use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

use crate::{
    domain::{
        CreateTimeEntry, ListParams, ProjectAssignment, TaskAssignment, TimeEntry, UpdateTimeEntry,
    },
    HarvestCredentials, HarvestURL, IntoCredentialsError,
};

/// Upper bound on followed `next_page` links, guards against a misbehaving server.
const MAX_PAGES: u32 = 50;

#[derive(Debug, Clone)]
pub struct HarvestClient {
    http: reqwest::Client,
    base_url: HarvestURL,
}

impl HarvestClient {
    pub fn new(
        credentials: &HarvestCredentials,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, HarvestError> {
        let http = reqwest::Client::builder()
            .default_headers(credentials.as_headers()?)
            .timeout(timeout)
            .build()
            .map_err(|e| HarvestError::RequestError(e.to_string()))?;

        Ok(Self {
            http,
            base_url: HarvestURL::new(base_url),
        })
    }

    fn url(&self, path: &str) -> HarvestURL {
        self.base_url.append_path(path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, HarvestError> {
        let resp = request
            .send()
            .await
            .map_err(|e| HarvestError::RequestError(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(HarvestError::from_status(status, body))
    }

    async fn fetch<T: DeserializeOwned>(&self, url: HarvestURL) -> Result<T, HarvestError> {
        let resp = self.send(self.http.get(url.as_ref())).await?;

        resp.json::<T>().await.map_err(|e| {
            HarvestError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })
    }

    #[tracing::instrument(name = "harvest.list_project_assignments", skip(self))]
    pub async fn list_project_assignments(&self) -> Result<Vec<ProjectAssignment>, HarvestError> {
        let mut assignments = Vec::new();
        let mut page = Some(1);

        while let Some(current) = page {
            if current > MAX_PAGES {
                tracing::warn!("Stopped following project assignment pages at {}", MAX_PAGES);
                break;
            }

            let url = self
                .url("/users/me/project_assignments")
                .with_query(&[("page", Some(current.to_string()))]);
            let response: ProjectAssignmentsPage = self.fetch(url).await?;

            assignments.extend(response.project_assignments);
            page = response.next_page;
        }

        tracing::debug!(count = assignments.len(), "Fetched project assignments");
        Ok(assignments.into_iter().filter(|a| a.is_active).collect())
    }

    /// Tasks assignable on `project_id`. Harvest has no per-project endpoint for the current
    /// user, so this walks the user's project assignments.
    #[tracing::instrument(name = "harvest.list_task_assignments", skip(self))]
    pub async fn list_task_assignments(
        &self,
        project_id: i64,
    ) -> Result<Vec<TaskAssignment>, HarvestError> {
        let assignments = self.list_project_assignments().await?;

        Ok(assignments
            .into_iter()
            .find(|a| a.project.id == project_id)
            .map(|a| {
                a.task_assignments
                    .into_iter()
                    .filter(|t| t.is_active)
                    .collect()
            })
            .unwrap_or_default())
    }

    #[tracing::instrument(name = "harvest.list_time_entries", skip(self))]
    pub async fn list_time_entries(
        &self,
        params: &ListParams,
    ) -> Result<Vec<TimeEntry>, HarvestError> {
        let url = self.url("/time_entries").with_query(&params.as_query());
        let response: TimeEntriesPage = self.fetch(url).await?;
        Ok(response.time_entries)
    }

    #[tracing::instrument(name = "harvest.get_time_entry", skip(self))]
    pub async fn get_time_entry(&self, id: i64) -> Result<TimeEntry, HarvestError> {
        self.fetch(self.url(&format!("/time_entries/{}", id))).await
    }

    #[tracing::instrument(name = "harvest.create_time_entry", skip(self))]
    pub async fn create_time_entry(
        &self,
        request: &CreateTimeEntry,
    ) -> Result<TimeEntry, HarvestError> {
        let url = self.url("/time_entries");
        let resp = self.send(self.http.post(url.as_ref()).json(request)).await?;

        resp.json::<TimeEntry>().await.map_err(|e| {
            HarvestError::ParsingError(format!("Failed to parse created entry: {}", e))
        })
    }

    /// Sends only the fields set in `changes`; Harvest keeps the rest.
    #[tracing::instrument(name = "harvest.update_time_entry", skip(self))]
    pub async fn update_time_entry(
        &self,
        id: i64,
        changes: &UpdateTimeEntry,
    ) -> Result<TimeEntry, HarvestError> {
        let url = self.url(&format!("/time_entries/{}", id));
        let resp = self.send(self.http.patch(url.as_ref()).json(changes)).await?;

        resp.json::<TimeEntry>().await.map_err(|e| {
            HarvestError::ParsingError(format!("Failed to parse updated entry: {}", e))
        })
    }

    #[tracing::instrument(name = "harvest.delete_time_entry", skip(self))]
    pub async fn delete_time_entry(&self, id: i64) -> Result<(), HarvestError> {
        let url = self.url(&format!("/time_entries/{}", id));
        self.send(self.http.delete(url.as_ref())).await?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Unauthorized: check the Harvest token and account id")]
    Unauthorized,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Harvest API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("RequestError: {0}")]
    RequestError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error(transparent)]
    Credentials(#[from] IntoCredentialsError),
}

impl HarvestError {
    fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => HarvestError::Unauthorized,
            StatusCode::NOT_FOUND => HarvestError::NotFound(body),
            _ => HarvestError::Api {
                status: status.as_u16(),
                body,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProjectAssignmentsPage {
    project_assignments: Vec<ProjectAssignment>,
    next_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TimeEntriesPage {
    time_entries: Vec<TimeEntry>,
}
