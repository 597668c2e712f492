//! Error types for critical path computation.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while computing a critical path.
///
/// An empty task list is not an error; it yields an empty result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriticalPathError {
    /// A task ends before it starts.
    #[error("Task {task_id} ends before it starts ({end} < {start})")]
    InvalidDateRange {
        task_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// A task references a dependency that is not in the input set.
    /// Only raised when `strict_dependencies` is enabled.
    #[error("Task {task_id} depends on unknown task {dependency_id}")]
    UnknownDependency {
        task_id: String,
        dependency_id: String,
    },

    /// No topological order exists. Lists every task left unprocessed.
    #[error("Circular dependency detected among tasks: {}", task_ids.join(", "))]
    CyclicDependency { task_ids: Vec<String> },

    #[error("Duplicate task id: {0}")]
    DuplicateTaskId(String),

    #[error("Task {task_id} has invalid date {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { task_id: String, value: String },

    #[error("Critical path worker is no longer running")]
    WorkerDisconnected,
}
