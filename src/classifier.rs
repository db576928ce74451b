//! Streamable / off-stream classification.
//!
//! A task is streamable iff it carries the configured label. Labels are
//! compared after trimming, ignoring case, so `Streamable` and
//! ` streamable ` both match a configured `streamable`.

use crate::config::PlannerConfig;
use crate::error::ConfigError;
use crate::models::{Bucket, Task};

/// Label-based bucket classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    label: String,
}

impl Classifier {
    /// Creates a classifier for the given marker label.
    pub fn new(label: impl AsRef<str>) -> Result<Self, ConfigError> {
        let label = normalize(label.as_ref());
        if label.is_empty() {
            return Err(ConfigError::EmptyStreamableLabel);
        }
        Ok(Self { label })
    }

    /// Builds a classifier from the planner configuration.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, ConfigError> {
        Self::new(&config.streamable_label)
    }

    /// The normalized marker label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Bucket for a task. Total: every task gets exactly one.
    pub fn classify(&self, task: &Task) -> Bucket {
        if task.labels.iter().any(|l| normalize(l) == self.label) {
            Bucket::Streamable
        } else {
            Bucket::OffStream
        }
    }

    /// Sets `bucket` on every task.
    pub fn classify_all(&self, tasks: Vec<Task>) -> Vec<Task> {
        tasks
            .into_iter()
            .map(|mut task| {
                task.bucket = Some(self.classify(&task));
                task
            })
            .collect()
    }

    /// Splits tasks into (streamable, off-stream), preserving input order.
    pub fn partition(&self, tasks: Vec<Task>) -> (Vec<Task>, Vec<Task>) {
        self.classify_all(tasks)
            .into_iter()
            .partition(Task::is_streamable)
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new("streamable").unwrap()
    }

    #[test]
    fn test_label_marks_streamable() {
        let c = classifier();
        let task = Task::new(1).with_label("bug").with_label("streamable");
        assert_eq!(c.classify(&task), Bucket::Streamable);
    }

    #[test]
    fn test_case_and_whitespace_ignored() {
        let c = Classifier::new(" Streamable ").unwrap();
        assert_eq!(c.label(), "streamable");
        assert_eq!(
            c.classify(&Task::new(1).with_label("STREAMABLE")),
            Bucket::Streamable
        );
        assert_eq!(
            c.classify(&Task::new(2).with_label(" streamable")),
            Bucket::Streamable
        );
    }

    #[test]
    fn test_missing_label_is_off_stream() {
        let c = classifier();
        assert_eq!(c.classify(&Task::new(1)), Bucket::OffStream);
        assert_eq!(
            c.classify(&Task::new(2).with_label("stream")),
            Bucket::OffStream
        );
    }

    #[test]
    fn test_partition_preserves_order() {
        let c = classifier();
        let tasks = vec![
            Task::new(1).with_label("streamable"),
            Task::new(2),
            Task::new(3).with_label("Streamable"),
            Task::new(4).with_label("docs"),
        ];
        let (stream, off) = c.partition(tasks);
        assert_eq!(stream.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(off.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 4]);
        assert!(stream.iter().all(|t| t.bucket == Some(Bucket::Streamable)));
        assert!(off.iter().all(|t| t.bucket == Some(Bucket::OffStream)));
    }

    #[test]
    fn test_empty_label_rejected() {
        assert!(matches!(
            Classifier::new("   "),
            Err(ConfigError::EmptyStreamableLabel)
        ));
    }
}
