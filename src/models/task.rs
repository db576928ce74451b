//! Task (work item) model.
//!
//! A task is one externally tracked issue. The task source fills in the
//! descriptive fields; the engine stages fill in `hours`, `bucket`, and
//! `score` in that order. The packer only reads tasks; it never mutates
//! its inputs.

use serde::{Deserialize, Serialize};

use super::{Bucket, ImportanceTier, Pillar, UrgencyTier};

/// A unit of schedulable work.
///
/// # Lifecycle
/// `hours`, `bucket`, and `score` start as `None` and are set by the
/// Estimator, Classifier, and Scorer respectively. A task reaching the
/// packer with any of them unset is an invariant violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Stable external identifier (issue number).
    pub id: u64,
    /// Display text.
    pub title: String,
    /// Raw description, read only by the estimator.
    pub body: Option<String>,
    /// Issue labels.
    pub labels: Vec<String>,
    /// Strategic category.
    pub pillar: Pillar,
    /// Urgency tier.
    pub urgency: UrgencyTier,
    /// Importance tier.
    pub importance: ImportanceTier,
    /// Milestone key. `None` = ungrouped.
    pub milestone: Option<String>,
    /// Project identifier, counted against the per-day project ceiling.
    pub project: String,
    /// Estimated hours (set by the estimator).
    pub hours: Option<u32>,
    /// Daily block (set by the classifier).
    pub bucket: Option<Bucket>,
    /// Priority score, higher = scheduled first (set by the scorer).
    pub score: Option<f64>,
}

impl Task {
    /// Creates a task with the given ID and neutral defaults.
    ///
    /// Defaults: cleanup pillar, medium urgency, medium importance,
    /// no milestone, empty project.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            title: String::new(),
            body: None,
            labels: Vec::new(),
            pillar: Pillar::Cleanup,
            urgency: UrgencyTier::Medium,
            importance: ImportanceTier::Medium,
            milestone: None,
            project: String::new(),
            hours: None,
            bucket: None,
            score: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Sets the pillar.
    pub fn with_pillar(mut self, pillar: Pillar) -> Self {
        self.pillar = pillar;
        self
    }

    /// Sets the urgency tier.
    pub fn with_urgency(mut self, urgency: UrgencyTier) -> Self {
        self.urgency = urgency;
        self
    }

    /// Sets the importance tier.
    pub fn with_importance(mut self, importance: ImportanceTier) -> Self {
        self.importance = importance;
        self
    }

    /// Sets the milestone key.
    pub fn with_milestone(mut self, milestone: impl Into<String>) -> Self {
        self.milestone = Some(milestone.into());
        self
    }

    /// Sets the project identifier.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// Sets a pre-computed estimate. The estimator leaves it untouched.
    pub fn with_hours(mut self, hours: u32) -> Self {
        self.hours = Some(hours);
        self
    }

    /// Sets the bucket.
    pub fn with_bucket(mut self, bucket: Bucket) -> Self {
        self.bucket = Some(bucket);
        self
    }

    /// Sets the score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Estimated hours, or 0 when not yet estimated.
    #[inline]
    pub fn hours_or_zero(&self) -> u32 {
        self.hours.unwrap_or(0)
    }

    /// Score, or 0.0 when not yet scored.
    #[inline]
    pub fn score_or_zero(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }

    /// Whether the task is classified streamable.
    pub fn is_streamable(&self) -> bool {
        self.bucket == Some(Bucket::Streamable)
    }

    /// Whether estimator, classifier, and scorer have all run.
    pub fn is_ready(&self) -> bool {
        self.hours.is_some_and(|h| h > 0) && self.bucket.is_some() && self.score.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new(42)
            .with_title("Ship billing page")
            .with_body("Estimate: 3h")
            .with_label("streamable")
            .with_pillar(Pillar::Revenue)
            .with_urgency(UrgencyTier::High)
            .with_importance(ImportanceTier::Blocking)
            .with_milestone("v1.0")
            .with_project("shop");

        assert_eq!(task.id, 42);
        assert_eq!(task.title, "Ship billing page");
        assert_eq!(task.body.as_deref(), Some("Estimate: 3h"));
        assert_eq!(task.labels, vec!["streamable".to_string()]);
        assert_eq!(task.pillar, Pillar::Revenue);
        assert_eq!(task.urgency, UrgencyTier::High);
        assert_eq!(task.importance, ImportanceTier::Blocking);
        assert_eq!(task.milestone.as_deref(), Some("v1.0"));
        assert_eq!(task.project, "shop");
        assert!(task.hours.is_none());
    }

    #[test]
    fn test_task_ready() {
        let task = Task::new(1);
        assert!(!task.is_ready());

        let task = task.with_hours(2).with_bucket(Bucket::OffStream).with_score(1.5);
        assert!(task.is_ready());
        assert!(!task.is_streamable());

        let zero = Task::new(2)
            .with_hours(0)
            .with_bucket(Bucket::Streamable)
            .with_score(1.0);
        assert!(!zero.is_ready());
    }

    #[test]
    fn test_task_defaults() {
        let task = Task::new(7);
        assert_eq!(task.hours_or_zero(), 0);
        assert_eq!(task.score_or_zero(), 0.0);
        assert!(task.milestone.is_none());
    }
}
