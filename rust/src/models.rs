//! Core data types for critical path computation.

use chrono::NaiveDate;
use pyo3::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::error::CriticalPathError;

// Note: We use std HashMap/HashSet in results for PyO3 interface compatibility

/// Date format accepted by [`Task::from_iso_dates`].
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A task with an inclusive date range and Finish-to-Start predecessors.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub start_date: NaiveDate,
    #[pyo3(get, set)]
    pub end_date: NaiveDate,
    /// IDs of tasks that must finish before this one may start.
    #[pyo3(get, set)]
    pub dependencies: Vec<String>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        dependencies: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start_date,
            end_date,
            dependencies,
        }
    }

    /// Build a task from `YYYY-MM-DD` date strings.
    pub fn from_iso_dates(
        id: impl Into<String>,
        start_date: &str,
        end_date: &str,
        dependencies: Vec<String>,
    ) -> Result<Self, CriticalPathError> {
        let id = id.into();
        let start_date = parse_iso_date(&id, start_date)?;
        let end_date = parse_iso_date(&id, end_date)?;
        Ok(Self::new(id, start_date, end_date, dependencies))
    }

    /// Inclusive day count (`end - start + 1`). Negative spans are possible
    /// here; the dependency index decides how to treat them.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

fn parse_iso_date(task_id: &str, value: &str) -> Result<NaiveDate, CriticalPathError> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).map_err(|_| {
        CriticalPathError::InvalidDate {
            task_id: task_id.to_string(),
            value: value.to_string(),
        }
    })
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (id, start_date, end_date, dependencies=None))]
    fn py_new(
        id: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        dependencies: Option<Vec<String>>,
    ) -> Self {
        Self::new(id, start_date, end_date, dependencies.unwrap_or_default())
    }

    /// Construct from ISO date strings, raising ValueError on malformed dates.
    #[staticmethod]
    #[pyo3(name = "from_iso", signature = (id, start_date, end_date, dependencies=None))]
    fn py_from_iso(
        id: String,
        start_date: &str,
        end_date: &str,
        dependencies: Option<Vec<String>>,
    ) -> PyResult<Self> {
        Self::from_iso_dates(id, start_date, end_date, dependencies.unwrap_or_default())
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    #[getter]
    fn duration(&self) -> i64 {
        self.duration_days()
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, start={}, end={}, deps={})",
            self.id,
            self.start_date,
            self.end_date,
            self.dependencies.len()
        )
    }
}

/// Per-task timing computed by the forward and backward passes.
///
/// All values are in days relative to the project start (day 0).
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskTiming {
    #[pyo3(get)]
    pub duration: f64,
    #[pyo3(get)]
    pub earliest_start: f64,
    #[pyo3(get)]
    pub earliest_finish: f64,
    #[pyo3(get)]
    pub latest_start: f64,
    #[pyo3(get)]
    pub latest_finish: f64,
    /// `latest_start - earliest_start`.
    #[pyo3(get)]
    pub slack: f64,
}

impl TaskTiming {
    /// Durations are whole days, so slack is exact; the tolerance only
    /// matters if fractional durations are ever introduced.
    pub fn is_critical(&self, tolerance: f64) -> bool {
        self.slack <= tolerance
    }
}

#[pymethods]
impl TaskTiming {
    fn __repr__(&self) -> String {
        format!(
            "TaskTiming(es={}, ef={}, ls={}, lf={}, slack={})",
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish,
            self.slack
        )
    }
}

/// Full output of a critical path computation.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleResult {
    /// Timing for every input task, keyed by task ID.
    #[pyo3(get)]
    pub timings: HashMap<String, TaskTiming>,
    /// IDs of zero-slack tasks.
    #[pyo3(get)]
    pub critical_path: HashSet<String>,
    /// Critical task IDs in dependency order (ties follow input order).
    #[pyo3(get)]
    pub critical_order: Vec<String>,
    /// Project length in days: the maximum earliest finish.
    #[pyo3(get)]
    pub horizon: f64,
    /// Sum of all task durations.
    #[pyo3(get)]
    pub total_work: f64,
    /// `(task_id, dependency_id)` pairs whose dependency was not in the input.
    #[pyo3(get)]
    pub ignored_dependencies: Vec<(String, String)>,
}

#[pymethods]
impl ScheduleResult {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(tasks={}, critical={}, horizon={})",
            self.timings.len(),
            self.critical_path.len(),
            self.horizon
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_duration_is_inclusive() {
        let task = Task::new("a", date(2025, 1, 1), date(2025, 1, 5), vec![]);
        assert_eq!(task.duration_days(), 5);

        let same_day = Task::new("b", date(2025, 1, 1), date(2025, 1, 1), vec![]);
        assert_eq!(same_day.duration_days(), 1);
    }

    #[test]
    fn test_duration_across_month_boundary() {
        let task = Task::new("a", date(2025, 1, 30), date(2025, 2, 2), vec![]);
        assert_eq!(task.duration_days(), 4);
    }

    #[test]
    fn test_from_iso_dates() {
        let task =
            Task::from_iso_dates("a", "2025-01-06", "2025-01-10", vec!["x".to_string()]).unwrap();
        assert_eq!(task.start_date, date(2025, 1, 6));
        assert_eq!(task.end_date, date(2025, 1, 10));
        assert_eq!(task.dependencies, vec!["x".to_string()]);
    }

    #[test]
    fn test_from_iso_dates_rejects_garbage() {
        let err = Task::from_iso_dates("a", "2025-13-01", "2025-01-10", vec![]).unwrap_err();
        assert_eq!(
            err,
            CriticalPathError::InvalidDate {
                task_id: "a".to_string(),
                value: "2025-13-01".to_string(),
            }
        );
    }

    #[test]
    fn test_timing_critical_tolerance() {
        let timing = TaskTiming {
            slack: 0.0,
            ..Default::default()
        };
        assert!(timing.is_critical(1e-9));

        let with_slack = TaskTiming {
            slack: 2.0,
            ..Default::default()
        };
        assert!(!with_slack.is_critical(1e-9));
    }
}
