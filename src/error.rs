//! Error types.
//!
//! Two failure kinds abort a planning run: a bad configuration and a task
//! that reached the packer in an inconsistent state. Fallback estimates and
//! overflow are data in [`ScheduleResult`](crate::models::ScheduleResult),
//! never errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationError;

/// Configuration rejected before any task is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing {table} entry for '{key}'")]
    MissingWeight { table: &'static str, key: String },

    #[error("{table} entry for '{key}' must be a finite non-negative number, got {value}")]
    InvalidWeight {
        table: &'static str,
        key: String,
        value: f64,
    },

    #[error("{field} must be positive")]
    NonPositiveCapacity { field: &'static str },

    #[error("days_per_week must be between 1 and 7, got {0}")]
    InvalidDayCount(usize),

    #[error("max_projects_per_day must be at least 1")]
    InvalidProjectCeiling,

    #[error("default_estimate_hours ({default}) must be between 1 and max_estimate_hours ({max})")]
    InvalidEstimateBounds { default: u32, max: u32 },

    #[error("streamable_label must not be empty")]
    EmptyStreamableLabel,

    #[error("invalid cohesion window: target {target}h, tolerance -{below}h/+{above}h")]
    InvalidCohesionWindow { target: u32, below: u32, above: u32 },

    #[error("weights overflow the score of task #{task_id}")]
    NonFiniteScore { task_id: u64 },

    #[error("estimate pattern #{index} '{pattern}' does not compile: {reason}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        reason: String,
    },

    #[error("estimate pattern #{index} '{pattern}' has no capture group for the hours value")]
    PatternWithoutCapture { index: usize, pattern: String },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// A planning run failed.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invariant violation: {}", join_messages(.0))]
    InvariantViolation(Vec<ValidationError>),
}

impl PlanError {
    /// Whether this is a configuration failure.
    pub fn is_config(&self) -> bool {
        matches!(self, PlanError::Config(_))
    }

    /// The violations, if this is an invariant failure.
    pub fn violations(&self) -> Option<&[ValidationError]> {
        match self {
            PlanError::InvariantViolation(errors) => Some(errors),
            PlanError::Config(_) => None,
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
