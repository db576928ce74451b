//! Deterministic priority ordering.
//!
//! Every sort in the engine goes through these comparators, so two runs
//! over the same input always visit tasks and groups in the same order.

use std::cmp::Ordering;

use crate::models::{MilestoneGroup, Task};

/// Task priority: score descending, then more urgent tier, then lower ID.
///
/// Unscored tasks compare as score 0.0.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    b.score_or_zero()
        .total_cmp(&a.score_or_zero())
        .then_with(|| a.urgency.cmp(&b.urgency))
        .then_with(|| a.id.cmp(&b.id))
}

/// Group priority: total score descending, then most urgent member, then
/// lowest member ID, then milestone key.
pub fn compare_groups(a: &MilestoneGroup, b: &MilestoneGroup) -> Ordering {
    b.total_score()
        .total_cmp(&a.total_score())
        .then_with(|| a.most_urgent().cmp(&b.most_urgent()))
        .then_with(|| a.min_task_id().cmp(&b.min_task_id()))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sorts tasks highest priority first.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(compare_tasks);
}

/// Sorts groups highest priority first.
pub fn sort_groups(groups: &mut [MilestoneGroup]) {
    groups.sort_by(compare_groups);
}
