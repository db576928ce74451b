//! Milestone group model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Task, UrgencyTier};

/// Tasks sharing a milestone whose summed hours fall in the cohesion window.
///
/// A group is a placement candidate: the packer puts all members on one
/// day or none of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneGroup {
    /// Group identifier (the milestone key).
    pub id: String,
    /// Member tasks, highest priority first.
    pub tasks: Vec<Task>,
    /// Sum of member hours.
    pub total_hours: u32,
}

impl MilestoneGroup {
    /// Creates a group, computing `total_hours` from the members.
    ///
    /// The total saturates at `u32::MAX`.
    pub fn new(id: impl Into<String>, tasks: Vec<Task>) -> Self {
        let total_hours = tasks
            .iter()
            .map(Task::hours_or_zero)
            .fold(0u32, u32::saturating_add);
        Self {
            id: id.into(),
            tasks,
            total_hours,
        }
    }

    /// Sum of member scores.
    pub fn total_score(&self) -> f64 {
        self.tasks.iter().map(Task::score_or_zero).sum()
    }

    /// Distinct projects touched by the group.
    pub fn projects(&self) -> BTreeSet<&str> {
        self.tasks.iter().map(|t| t.project.as_str()).collect()
    }

    /// Most urgent member tier. `None` for an empty group.
    pub fn most_urgent(&self) -> Option<UrgencyTier> {
        self.tasks.iter().map(|t| t.urgency).min()
    }

    /// Lowest member ID. `None` for an empty group.
    pub fn min_task_id(&self) -> Option<u64> {
        self.tasks.iter().map(|t| t.id).min()
    }

    /// Number of member tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: u64, hours: u32, score: f64, project: &str, urgency: UrgencyTier) -> Task {
        Task::new(id)
            .with_milestone("m1")
            .with_project(project)
            .with_urgency(urgency)
            .with_hours(hours)
            .with_score(score)
    }

    #[test]
    fn test_group_aggregates() {
        let group = MilestoneGroup::new(
            "m1",
            vec![
                member(9, 1, 2.0, "api", UrgencyTier::Low),
                member(4, 3, 1.5, "web", UrgencyTier::High),
                member(6, 0, 0.5, "api", UrgencyTier::Medium),
            ],
        );

        assert_eq!(group.total_hours, 4);
        assert!((group.total_score() - 4.0).abs() < 1e-10);
        assert_eq!(group.projects().into_iter().collect::<Vec<_>>(), vec!["api", "web"]);
        assert_eq!(group.most_urgent(), Some(UrgencyTier::High));
        assert_eq!(group.min_task_id(), Some(4));
        assert_eq!(group.len(), 3);
    }

    #[test]
    fn test_empty_group() {
        let group = MilestoneGroup::new("empty", Vec::new());
        assert!(group.is_empty());
        assert_eq!(group.total_hours, 0);
        assert_eq!(group.most_urgent(), None);
        assert_eq!(group.min_task_id(), None);
    }

    #[test]
    fn test_total_hours_saturates() {
        let group = MilestoneGroup::new(
            "m1",
            vec![
                member(1, u32::MAX, 1.0, "api", UrgencyTier::Low),
                member(2, 5, 1.0, "api", UrgencyTier::Low),
            ],
        );
        assert_eq!(group.total_hours, u32::MAX);
    }
}
