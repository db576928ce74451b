//! End-to-end weekly planner.
//!
//! Runs the engine stages in order over one task list:
//!
//! ```text
//! Estimator -> Classifier -> Scorer -> MilestoneGrouper -> Packer
//! ```
//!
//! The planner owns compiled patterns and validated weight tables, so one
//! instance can plan any number of weeks. It holds no other state; each
//! call is a pure function of (configuration, tasks).

use tracing::{info, instrument};

use super::Packer;
use crate::classifier::Classifier;
use crate::config::PlannerConfig;
use crate::error::{ConfigError, PlanError};
use crate::estimator::Estimator;
use crate::grouping::MilestoneGrouper;
use crate::models::{ScheduleResult, Task};
use crate::scoring::Scorer;

/// Configured planning pipeline.
///
/// # Example
///
/// ```
/// use u_weekplan::config::PlannerConfig;
/// use u_weekplan::models::{Pillar, Task};
/// use u_weekplan::scheduler::Planner;
///
/// let planner = Planner::new(PlannerConfig::default()).unwrap();
/// let tasks = vec![
///     Task::new(1)
///         .with_body("Estimate: 2h")
///         .with_label("streamable")
///         .with_pillar(Pillar::Revenue)
///         .with_project("shop"),
///     Task::new(2).with_body("[1h]").with_project("infra"),
/// ];
///
/// let week = planner.plan(tasks).unwrap();
/// assert!(week.is_complete());
/// assert_eq!(week.days[0].stream.used_hours, 2);
/// assert_eq!(week.days[0].off_stream.used_hours, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
    estimator: Estimator,
    classifier: Classifier,
    scorer: Scorer,
    grouper: MilestoneGrouper,
    packer: Packer,
}

impl Planner {
    /// Validates `config` and builds every stage from it.
    pub fn new(config: PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            estimator: Estimator::from_config(&config)?,
            classifier: Classifier::from_config(&config)?,
            scorer: Scorer::from_config(&config)?,
            grouper: MilestoneGrouper::from_config(&config),
            packer: Packer::from_config(&config)?,
            config,
        })
    }

    /// The configuration this planner was built from.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The estimator stage.
    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    /// The scorer stage.
    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Plans one week.
    ///
    /// Tasks that arrive with `hours` already set keep them; the rest are
    /// estimated from their body.
    ///
    /// # Errors
    /// - [`PlanError::Config`] if a task cannot be scored.
    /// - [`PlanError::InvariantViolation`] if the task list is inconsistent
    ///   (e.g. duplicate IDs or a pre-set zero estimate).
    #[instrument(skip_all, fields(tasks = tasks.len()))]
    pub fn plan(&self, tasks: Vec<Task>) -> Result<ScheduleResult, PlanError> {
        let (tasks, fallbacks) = self.estimator.batch_estimate(tasks);
        let tasks = self.classifier.classify_all(tasks);
        let tasks = self.scorer.score_all(tasks)?;
        let outcome = self.grouper.group(tasks);

        info!(
            groups = outcome.groups.len(),
            grouped_tasks = outcome.grouped_task_count(),
            ungrouped_tasks = outcome.ungrouped.len(),
            fallbacks = fallbacks.len(),
            "tasks prepared"
        );

        let mut result = self.packer.pack(&outcome.ungrouped, &outcome.groups)?;
        result.estimation_fallbacks = fallbacks;
        Ok(result)
    }
}

/// Plans one week with a one-off planner.
pub fn plan_week(config: &PlannerConfig, tasks: Vec<Task>) -> Result<ScheduleResult, PlanError> {
    Planner::new(config.clone())?.plan(tasks)
}
