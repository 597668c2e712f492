//! Critical path scheduling engine.
//!
//! Given tasks with inclusive date ranges and Finish-to-Start dependencies,
//! computes earliest/latest start and finish, slack, and the set of tasks on
//! the critical path. The engine is pure: each call builds its own arena and
//! keeps no state between calls.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashSet;

pub mod calculation;
mod config;
mod error;
pub mod graph;
mod interner;
pub mod logging;
mod models;
pub mod worker;

pub use calculation::{compute_critical_path, compute_critical_path_with_config, compute_schedule};
pub use config::CriticalPathConfig;
pub use error::CriticalPathError;
pub use graph::DependencyIndex;
pub use interner::{TaskIdInt, TaskIdInterner};
pub use models::{ScheduleResult, Task, TaskTiming, ISO_DATE_FORMAT};
pub use worker::{CriticalPathWorker, PendingSchedule};

fn to_py_err(err: CriticalPathError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Compute the set of task IDs on the critical path.
///
/// The GIL is released while computing.
///
/// # Raises
/// * ValueError on cycles, inverted date ranges, duplicate IDs, or (in strict
///   mode) unknown dependencies
#[pyfunction]
#[pyo3(name = "compute_critical_path", signature = (tasks, config=None))]
fn py_compute_critical_path(
    py: Python<'_>,
    tasks: Vec<Task>,
    config: Option<CriticalPathConfig>,
) -> PyResult<HashSet<String>> {
    let config = config.unwrap_or_default();
    py.allow_threads(|| compute_critical_path_with_config(&tasks, &config))
        .map_err(to_py_err)
}

/// Compute full per-task timings along with the critical path.
#[pyfunction]
#[pyo3(name = "compute_schedule", signature = (tasks, config=None))]
fn py_compute_schedule(
    py: Python<'_>,
    tasks: Vec<Task>,
    config: Option<CriticalPathConfig>,
) -> PyResult<ScheduleResult> {
    let config = config.unwrap_or_default();
    py.allow_threads(|| compute_schedule(&tasks, &config))
        .map_err(to_py_err)
}

/// The critpath.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Task>()?;
    m.add_class::<TaskTiming>()?;
    m.add_class::<ScheduleResult>()?;
    m.add_class::<CriticalPathConfig>()?;

    m.add_function(wrap_pyfunction!(py_compute_critical_path, m)?)?;
    m.add_function(wrap_pyfunction!(py_compute_schedule, m)?)?;

    Ok(())
}
