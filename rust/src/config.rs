//! Configuration for the critical path engine.

use pyo3::prelude::*;

/// Policies and diagnostics for a critical path computation.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct CriticalPathConfig {
    /// Tasks with slack at or below this value are critical.
    #[pyo3(get, set)]
    pub slack_tolerance: f64,
    /// Clamp tasks whose end date precedes their start date to 1 day
    /// instead of rejecting the computation.
    #[pyo3(get, set)]
    pub clamp_inverted_ranges: bool,
    /// Reject dependencies on tasks missing from the input instead of ignoring them.
    #[pyo3(get, set)]
    pub strict_dependencies: bool,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for CriticalPathConfig {
    fn default() -> Self {
        Self {
            slack_tolerance: 1e-9,
            clamp_inverted_ranges: false,
            strict_dependencies: false,
            verbosity: 0,
        }
    }
}

#[pymethods]
impl CriticalPathConfig {
    #[new]
    #[pyo3(signature = (
        slack_tolerance=None,
        clamp_inverted_ranges=None,
        strict_dependencies=None,
        verbosity=None
    ))]
    fn new(
        slack_tolerance: Option<f64>,
        clamp_inverted_ranges: Option<bool>,
        strict_dependencies: Option<bool>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            slack_tolerance: slack_tolerance.unwrap_or(defaults.slack_tolerance),
            clamp_inverted_ranges: clamp_inverted_ranges
                .unwrap_or(defaults.clamp_inverted_ranges),
            strict_dependencies: strict_dependencies.unwrap_or(defaults.strict_dependencies),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CriticalPathConfig(slack_tolerance={}, clamp_inverted_ranges={}, strict_dependencies={}, verbosity={})",
            self.slack_tolerance, self.clamp_inverted_ranges, self.strict_dependencies, self.verbosity
        )
    }
}
