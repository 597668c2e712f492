//! Dependency index and topological ordering.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use crate::config::CriticalPathConfig;
use crate::error::CriticalPathError;
use crate::interner::{TaskIdInt, TaskIdInterner};
use crate::models::Task;
use crate::log_checks;

/// Pre-computed task data for one critical path computation.
/// All lookups use direct array indexing by interned ID.
pub struct DependencyIndex {
    /// Task ID string <-> integer mapping, in input order.
    pub interner: TaskIdInterner,
    /// Inclusive durations in days, indexed by task ID.
    pub durations: Vec<f64>,
    /// Resolved predecessors, indexed by task ID. Repeats are collapsed.
    pub predecessors: Vec<Vec<TaskIdInt>>,
    /// Reverse adjacency: tasks that list this task as a dependency.
    pub successors: Vec<Vec<TaskIdInt>>,
    /// `(task_id, dependency_id)` pairs that did not resolve to an input task.
    pub ignored: Vec<(String, String)>,
}

impl DependencyIndex {
    /// Build the index from a flat task list.
    ///
    /// Fails on duplicate IDs, on inverted date ranges (unless clamping is
    /// configured), and on unknown dependencies in strict mode.
    pub fn build(tasks: &[Task], config: &CriticalPathConfig) -> Result<Self, CriticalPathError> {
        let n = tasks.len();
        let mut interner = TaskIdInterner::with_capacity(n);
        let mut durations = Vec::with_capacity(n);

        for task in tasks {
            if interner.insert(&task.id).is_none() {
                return Err(CriticalPathError::DuplicateTaskId(task.id.clone()));
            }
            durations.push(task_duration(task, config)?);
        }

        let mut predecessors: Vec<Vec<TaskIdInt>> = vec![Vec::new(); n];
        let mut successors: Vec<Vec<TaskIdInt>> = vec![Vec::new(); n];
        let mut ignored = Vec::new();
        let mut seen: FxHashSet<TaskIdInt> = FxHashSet::default();

        // Interned IDs follow input order, so task i has ID i
        for (idx, task) in tasks.iter().enumerate() {
            seen.clear();
            for dep_id in &task.dependencies {
                let Some(dep) = interner.get(dep_id) else {
                    if config.strict_dependencies {
                        return Err(CriticalPathError::UnknownDependency {
                            task_id: task.id.clone(),
                            dependency_id: dep_id.clone(),
                        });
                    }
                    log_checks!(
                        config.verbosity,
                        "Ignoring unknown dependency {} of task {}",
                        dep_id,
                        task.id
                    );
                    ignored.push((task.id.clone(), dep_id.clone()));
                    continue;
                };
                if seen.insert(dep) {
                    predecessors[idx].push(dep);
                    successors[dep as usize].push(idx as TaskIdInt);
                }
            }
        }

        Ok(Self {
            interner,
            durations,
            predecessors,
            successors,
            ignored,
        })
    }

    pub fn len(&self) -> usize {
        self.interner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interner.is_empty()
    }

    pub fn name(&self, id: TaskIdInt) -> &str {
        self.interner.resolve(id).unwrap_or_default()
    }

    /// Order tasks so every predecessor comes before its dependents (Kahn's algorithm).
    ///
    /// Zero in-degree tasks are seeded in input order, so the result is
    /// deterministic for a given input.
    pub fn topological_order(&self) -> Result<Vec<TaskIdInt>, CriticalPathError> {
        let n = self.len();
        let mut in_degree: Vec<usize> = self.predecessors.iter().map(Vec::len).collect();

        let mut queue: VecDeque<TaskIdInt> = (0..n as TaskIdInt)
            .filter(|&id| in_degree[id as usize] == 0)
            .collect();
        let mut order: Vec<TaskIdInt> = Vec::with_capacity(n);

        while let Some(task) = queue.pop_front() {
            order.push(task);
            for &succ in &self.successors[task as usize] {
                let degree = &mut in_degree[succ as usize];
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(succ);
                }
            }
        }

        if order.len() != n {
            // Whatever still has unmet predecessors sits on or behind a cycle
            let mut task_ids: Vec<String> = (0..n as TaskIdInt)
                .filter(|&id| in_degree[id as usize] > 0)
                .map(|id| self.name(id).to_string())
                .collect();
            task_ids.sort();
            return Err(CriticalPathError::CyclicDependency { task_ids });
        }

        Ok(order)
    }
}

fn task_duration(task: &Task, config: &CriticalPathConfig) -> Result<f64, CriticalPathError> {
    if task.end_date >= task.start_date {
        return Ok(task.duration_days() as f64);
    }
    if !config.clamp_inverted_ranges {
        return Err(CriticalPathError::InvalidDateRange {
            task_id: task.id.clone(),
            start: task.start_date,
            end: task.end_date,
        });
    }
    log_checks!(
        config.verbosity,
        "Clamping task {} to 1 day (end {} precedes start {})",
        task.id,
        task.end_date,
        task.start_date
    );
    Ok(1.0)
}
