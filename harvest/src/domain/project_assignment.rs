use serde::{Deserialize, Serialize};

/// A project the authenticated user is assigned to, with the tasks they may log time against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAssignment {
    pub id: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub project: ProjectRef,
    pub client: ClientRef,
    #[serde(default)]
    pub task_assignments: Vec<TaskAssignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAssignment {
    pub id: i64,
    #[serde(default)]
    pub billable: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub task: TaskRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: i64,
    pub name: String,
}

fn default_true() -> bool {
    true
}
