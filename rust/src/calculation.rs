//! Critical path calculation using forward and backward passes.

use std::collections::{HashMap, HashSet};

use crate::config::CriticalPathConfig;
use crate::error::CriticalPathError;
use crate::graph::DependencyIndex;
use crate::interner::TaskIdInt;
use crate::models::{ScheduleResult, Task, TaskTiming};
use crate::{log_changes, log_debug};

/// Compute the set of task IDs on the critical path, with default policies.
///
/// An empty task list yields an empty set. Dependencies on tasks missing
/// from `tasks` are ignored.
///
/// # Errors
/// * `InvalidDateRange` if a task ends before it starts
/// * `CyclicDependency` if the dependency graph has a cycle
/// * `DuplicateTaskId` if two tasks share an ID
pub fn compute_critical_path(tasks: &[Task]) -> Result<HashSet<String>, CriticalPathError> {
    compute_critical_path_with_config(tasks, &CriticalPathConfig::default())
}

pub fn compute_critical_path_with_config(
    tasks: &[Task],
    config: &CriticalPathConfig,
) -> Result<HashSet<String>, CriticalPathError> {
    compute_schedule(tasks, config).map(|result| result.critical_path)
}

/// Run the Critical Path Method over a flat task list.
///
/// This algorithm:
/// 1. Builds a dependency index (durations, predecessors, successors)
/// 2. Orders tasks topologically
/// 3. Forward pass: `ES = max(EF of predecessors)`, `EF = ES + duration`
/// 4. Backward pass: `LF = min(LS of successors)` or the horizon, `LS = LF - duration`
/// 5. Marks tasks with `LS - ES <= slack_tolerance` as critical
///
/// The per-task arena lives only for the duration of this call.
pub fn compute_schedule(
    tasks: &[Task],
    config: &CriticalPathConfig,
) -> Result<ScheduleResult, CriticalPathError> {
    if tasks.is_empty() {
        return Ok(ScheduleResult::default());
    }

    let index = DependencyIndex::build(tasks, config)?;
    let order = index.topological_order()?;

    let mut timings = vec![TaskTiming::default(); index.len()];
    forward_pass(&index, &order, &mut timings);

    let horizon = timings
        .iter()
        .map(|t| t.earliest_finish)
        .fold(0.0, f64::max);

    backward_pass(&index, &order, horizon, &mut timings);

    for &task in &order {
        let timing = &timings[task as usize];
        log_debug!(
            config.verbosity,
            "{}: dur={} es={} ef={} ls={} lf={} slack={}",
            index.name(task),
            timing.duration,
            timing.earliest_start,
            timing.earliest_finish,
            timing.latest_start,
            timing.latest_finish,
            timing.slack
        );
    }

    let result = assemble_result(index, &order, timings, horizon, config);

    log_changes!(
        config.verbosity,
        "Critical path: {} of {} tasks, horizon {} days",
        result.critical_path.len(),
        result.timings.len(),
        result.horizon
    );

    Ok(result)
}

fn forward_pass(index: &DependencyIndex, order: &[TaskIdInt], timings: &mut [TaskTiming]) {
    for &task in order {
        let idx = task as usize;
        let earliest_start = index.predecessors[idx]
            .iter()
            .map(|&dep| timings[dep as usize].earliest_finish)
            .fold(0.0, f64::max);

        let duration = index.durations[idx];
        let timing = &mut timings[idx];
        timing.duration = duration;
        timing.earliest_start = earliest_start;
        timing.earliest_finish = earliest_start + duration;
    }
}

fn backward_pass(
    index: &DependencyIndex,
    order: &[TaskIdInt],
    horizon: f64,
    timings: &mut [TaskTiming],
) {
    for &task in order.iter().rev() {
        let idx = task as usize;
        let successors = &index.successors[idx];

        let latest_finish = if successors.is_empty() {
            horizon
        } else {
            successors
                .iter()
                .map(|&succ| timings[succ as usize].latest_start)
                .fold(f64::INFINITY, f64::min)
        };

        let timing = &mut timings[idx];
        timing.latest_finish = latest_finish;
        timing.latest_start = latest_finish - timing.duration;
        timing.slack = timing.latest_start - timing.earliest_start;
    }
}

fn assemble_result(
    index: DependencyIndex,
    order: &[TaskIdInt],
    timings: Vec<TaskTiming>,
    horizon: f64,
    config: &CriticalPathConfig,
) -> ScheduleResult {
    let critical_order: Vec<String> = order
        .iter()
        .filter(|&&task| timings[task as usize].is_critical(config.slack_tolerance))
        .map(|&task| index.name(task).to_string())
        .collect();
    let critical_path: HashSet<String> = critical_order.iter().cloned().collect();

    let total_work: f64 = index.durations.iter().sum();

    let timings: HashMap<String, TaskTiming> = timings
        .into_iter()
        .enumerate()
        .map(|(idx, timing)| (index.name(idx as TaskIdInt).to_string(), timing))
        .collect();

    ScheduleResult {
        timings,
        critical_path,
        critical_order,
        horizon,
        total_work,
        ignored_dependencies: index.ignored,
    }
}
