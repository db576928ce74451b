//! Multiplicative score engine.
//!
//! Composes scoring factors and applies them to tasks. The engine checks
//! every task against every factor before scoring any of them, so a
//! configuration gap is reported without a half-scored task list.

use std::sync::Arc;

use super::factors::{ImportanceMultiplier, PillarWeight, UrgencyMultiplier};
use super::ScoreFactor;
use crate::config::{check_table, PlannerConfig};
use crate::error::ConfigError;
use crate::models::{ImportanceTier, Pillar, Task, UrgencyTier};

/// Per-factor contributions to a score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// (factor name, multiplier), in evaluation order.
    pub factors: Vec<(&'static str, f64)>,
    /// Product of all multipliers.
    pub total: f64,
}

/// Scores tasks as the product of their factor multipliers.
///
/// # Example
/// ```
/// use u_weekplan::scoring::Scorer;
/// use u_weekplan::scoring::factors::PillarWeight;
/// use u_weekplan::models::{Pillar, Task};
/// use std::collections::BTreeMap;
///
/// let scorer = Scorer::new().with_factor(PillarWeight(BTreeMap::from([
///     (Pillar::Revenue, 3.0),
/// ])));
/// assert_eq!(scorer.score(&Task::new(1).with_pillar(Pillar::Revenue)).unwrap(), 3.0);
/// assert!(scorer.score(&Task::new(2).with_pillar(Pillar::Cleanup)).is_err());
/// ```
#[derive(Clone)]
pub struct Scorer {
    factors: Vec<Arc<dyn ScoreFactor>>,
}

impl Scorer {
    /// Creates a scorer with no factors (every score is 1.0).
    pub fn new() -> Self {
        Self {
            factors: Vec::new(),
        }
    }

    /// Adds a factor.
    pub fn with_factor<F: ScoreFactor + 'static>(mut self, factor: F) -> Self {
        self.factors.push(Arc::new(factor));
        self
    }

    /// Builds the pillar × urgency × importance scorer from configuration.
    ///
    /// Every table must cover every variant with a finite, non-negative
    /// value.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, ConfigError> {
        check_table("pillar_weights", Pillar::ALL, &config.pillar_weights)?;
        check_table(
            "urgency_multipliers",
            UrgencyTier::ALL,
            &config.urgency_multipliers,
        )?;
        check_table(
            "importance_multipliers",
            ImportanceTier::ALL,
            &config.importance_multipliers,
        )?;

        Ok(Self::new()
            .with_factor(PillarWeight(config.pillar_weights.clone()))
            .with_factor(UrgencyMultiplier(config.urgency_multipliers.clone()))
            .with_factor(ImportanceMultiplier(config.importance_multipliers.clone())))
    }

    /// Names of the configured factors, in evaluation order.
    pub fn factor_names(&self) -> Vec<&'static str> {
        self.factors.iter().map(|f| f.name()).collect()
    }

    /// Score for a single task.
    ///
    /// Fails if a factor has no entry for the task, or if the weights are
    /// large enough that their product is not finite.
    pub fn score(&self, task: &Task) -> Result<f64, ConfigError> {
        let total = self
            .factors
            .iter()
            .try_fold(1.0, |acc, factor| {
                Ok::<f64, ConfigError>(acc * factor.evaluate(task)?)
            })?;
        finite(task, total)
    }

    /// Score with each factor's contribution.
    pub fn breakdown(&self, task: &Task) -> Result<ScoreBreakdown, ConfigError> {
        let factors = self
            .factors
            .iter()
            .map(|f| Ok((f.name(), f.evaluate(task)?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let total = finite(task, factors.iter().map(|(_, m)| m).product())?;
        Ok(ScoreBreakdown { factors, total })
    }

    /// Checks that every task can be scored, without scoring any.
    pub fn check_coverage(&self, tasks: &[Task]) -> Result<(), ConfigError> {
        for task in tasks {
            self.score(task)?;
        }
        Ok(())
    }

    /// Sets `score` on every task.
    ///
    /// Fails before any task is modified if one of them cannot be scored.
    pub fn score_all(&self, tasks: Vec<Task>) -> Result<Vec<Task>, ConfigError> {
        self.check_coverage(&tasks)?;
        tasks
            .into_iter()
            .map(|mut task| {
                task.score = Some(self.score(&task)?);
                Ok(task)
            })
            .collect()
    }
}

fn finite(task: &Task, total: f64) -> Result<f64, ConfigError> {
    if total.is_finite() {
        Ok(total)
    } else {
        Err(ConfigError::NonFiniteScore { task_id: task.id })
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scorer")
            .field("factors", &self.factor_names())
            .finish()
    }
}
