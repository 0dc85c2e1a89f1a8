// LogAnalyzer - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.

use crate::util::constants::MSG_SUCCESS;
use crate::util::error::TaskError;
use serde::{Deserialize, Serialize};

// =============================================================================
// Task descriptor (engine input)
// =============================================================================

/// One unit of work: a named log file to analyse.
///
/// Built by the task-list loader and only ever read by the engine.
/// The JSON field names (`path`, `type`) match the task list file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    /// Caller-chosen identifier. Not checked for uniqueness.
    pub id: String,

    /// Resource locator, interpreted only by the task runner.
    #[serde(rename = "path")]
    pub target: String,

    /// Opaque hint (e.g. "nginx-access"). Not interpreted by the core.
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl TaskDescriptor {
    pub fn new(id: impl Into<String>, target: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target: target.into(),
            kind: kind.into(),
        }
    }
}

// =============================================================================
// Outcome (engine output)
// =============================================================================

/// Final classification of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Success,
    #[serde(rename = "FAILED")]
    Failure,
}

impl Status {
    /// Label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Success => "OK",
            Status::Failure => "FAILED",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The single result produced for one `TaskDescriptor`.
///
/// Fields are private so an outcome cannot be altered once built; the
/// serialised field names are those of the JSON report format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    #[serde(rename = "log_id")]
    id: String,

    #[serde(rename = "file_path")]
    target: String,

    status: Status,

    message: String,

    /// Empty on success.
    #[serde(rename = "error_details")]
    error_detail: String,
}

impl Outcome {
    /// Successful outcome for `task`.
    pub fn success(task: &TaskDescriptor) -> Self {
        Self {
            id: task.id.clone(),
            target: task.target.clone(),
            status: Status::Success,
            message: MSG_SUCCESS.to_string(),
            error_detail: String::new(),
        }
    }

    /// Failed outcome for `task`, classified by `error`.
    pub fn failure(task: &TaskDescriptor, error: &TaskError) -> Self {
        Self {
            id: task.id.clone(),
            target: task.target.clone(),
            status: Status::Failure,
            message: error.summary().to_string(),
            error_detail: error.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error_detail(&self) -> &str {
        &self.error_detail
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
