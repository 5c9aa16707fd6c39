use serde::{Deserialize, Serialize, Serializer};
use time::Date;

use super::{spent_date_format, ClientRef, ProjectRef, TaskRef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: i64,
    #[serde(with = "spent_date_format")]
    pub spent_date: Date,
    pub hours: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_running: bool,
    pub project: ProjectRef,
    pub task: TaskRef,
    #[serde(default)]
    pub client: Option<ClientRef>,
}

/// Body of `POST /time_entries` for duration-based accounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTimeEntry {
    pub project_id: i64,
    pub task_id: i64,
    #[serde(with = "spent_date_format")]
    pub spent_date: Date,
    pub hours: f64,
}

/// Body of `PATCH /time_entries/{id}`. Fields left `None` are not sent and stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateTimeEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_spent_date"
    )]
    pub spent_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
}

impl UpdateTimeEntry {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn serialize_spent_date<S: Serializer>(
    date: &Option<Date>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => spent_date_format::serialize(date, serializer),
        None => serializer.serialize_none(),
    }
}
