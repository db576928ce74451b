//! Priority scoring and ordering.
//!
//! A task's score is the product of independent factor lookups (pillar
//! weight, urgency multiplier, importance multiplier). Multiplying rather
//! than summing lets one dominant factor, such as a blocking importance,
//! outrank many weakly weighted tasks.
//!
//! # Usage
//!
//! ```
//! use u_weekplan::config::PlannerConfig;
//! use u_weekplan::models::{ImportanceTier, Pillar, Task, UrgencyTier};
//! use u_weekplan::scoring::Scorer;
//!
//! let scorer = Scorer::from_config(&PlannerConfig::default()).unwrap();
//! let task = Task::new(1)
//!     .with_pillar(Pillar::Revenue)
//!     .with_urgency(UrgencyTier::High)
//!     .with_importance(ImportanceTier::Medium);
//! // 3.0 (revenue) * 2.0 (high) * 1.0 (medium)
//! assert_eq!(scorer.score(&task).unwrap(), 6.0);
//! ```
//!
//! # Ordering
//!
//! [`compare_tasks`] is the single tie-break chain used everywhere a
//! priority order is needed: score descending, then the more urgent tier,
//! then the lower ID.

mod engine;
pub mod factors;
mod order;

pub use engine::{ScoreBreakdown, Scorer};
pub use order::{compare_groups, compare_tasks, sort_groups, sort_tasks};

use crate::error::ConfigError;
use crate::models::Task;
use std::fmt::Debug;

/// A single multiplicative scoring factor.
///
/// # Contract
/// `evaluate` returns a finite, non-negative multiplier, or a
/// `ConfigError` when the task's variant has no table entry. It never
/// substitutes a default.
pub trait ScoreFactor: Send + Sync + Debug {
    /// Factor name (e.g., "pillar").
    fn name(&self) -> &'static str;

    /// Multiplier for the task.
    fn evaluate(&self, task: &Task) -> Result<f64, ConfigError>;
}
