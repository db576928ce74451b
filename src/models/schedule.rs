//! Schedule result model.
//!
//! The result of one planning run: the packed days, the tasks that did
//! not fit, and the tasks whose estimate fell back to the default.
//! Renderers consume it read-only.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Bucket, DaySlot, ScheduledTask, Task};

/// Why a task was deferred to the overflow list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowReason {
    /// No day had enough hours left in the task's lane.
    Capacity,
    /// Some day had the hours, but every such day would exceed the
    /// distinct-project ceiling.
    ProjectCeiling,
}

impl fmt::Display for OverflowReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowReason::Capacity => f.write_str("capacity"),
            OverflowReason::ProjectCeiling => f.write_str("project_ceiling"),
        }
    }
}

/// A task that could not be placed this week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverflowEntry {
    /// The deferred task.
    pub task: Task,
    /// Why it was deferred.
    pub reason: OverflowReason,
}

/// Why an estimate fell back to the configured default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// Body absent or whitespace only.
    MissingBody,
    /// No pattern matched.
    NoMatch,
    /// The first matching pattern captured zero.
    ZeroValue,
    /// The first matching pattern captured something that is not a number.
    Unparseable,
}

/// A task whose estimate came from the default rather than its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationFallback {
    /// Task ID.
    pub task_id: u64,
    /// Why the default was used.
    pub reason: FallbackReason,
}

/// Where a task ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Placed on day `day` in the lane for `bucket`.
    Scheduled { day: usize, bucket: Bucket },
    /// Deferred.
    Overflow(OverflowReason),
}

/// Output of a planning run.
///
/// Every input task appears exactly once: either in one day's lane or in
/// `overflow`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Days in calendar order.
    pub days: Vec<DaySlot>,
    /// Deferred tasks, in the order they were rejected.
    pub overflow: Vec<OverflowEntry>,
    /// Estimates that fell back to the default.
    pub estimation_fallbacks: Vec<EstimationFallback>,
}

impl ScheduleResult {
    /// Creates a result over the given days with nothing deferred.
    pub fn new(days: Vec<DaySlot>) -> Self {
        Self {
            days,
            overflow: Vec::new(),
            estimation_fallbacks: Vec::new(),
        }
    }

    /// Records a deferred task.
    pub fn add_overflow(&mut self, task: Task, reason: OverflowReason) {
        self.overflow.push(OverflowEntry { task, reason });
    }

    /// Whether every task was placed.
    pub fn is_complete(&self) -> bool {
        self.overflow.is_empty()
    }

    /// All placed tasks, day by day (stream lane before off-stream).
    pub fn scheduled(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.days.iter().flat_map(|d| d.scheduled())
    }

    /// IDs of all placed tasks, in day order.
    pub fn placed_task_ids(&self) -> Vec<u64> {
        self.scheduled().map(|s| s.task.id).collect()
    }

    /// Number of placed tasks.
    pub fn placed_count(&self) -> usize {
        self.scheduled().count()
    }

    /// Where a task ended up. `None` if it was never part of the run.
    pub fn placement_of(&self, task_id: u64) -> Option<Placement> {
        for day in &self.days {
            for bucket in Bucket::ALL {
                if day.lane(*bucket).tasks.iter().any(|s| s.task.id == task_id) {
                    return Some(Placement::Scheduled {
                        day: day.index,
                        bucket: *bucket,
                    });
                }
            }
        }
        self.overflow
            .iter()
            .find(|e| e.task.id == task_id)
            .map(|e| Placement::Overflow(e.reason))
    }

    /// Overflow entries with the given reason.
    pub fn overflow_by_reason(&self, reason: OverflowReason) -> Vec<&OverflowEntry> {
        self.overflow.iter().filter(|e| e.reason == reason).collect()
    }

    /// Hours placed in a bucket across the week.
    pub fn utilized_hours(&self, bucket: Bucket) -> u32 {
        self.days.iter().map(|d| d.lane(bucket).used_hours).sum()
    }

    /// Hours left unused in a bucket across the week.
    pub fn unused_hours(&self, bucket: Bucket) -> u32 {
        self.days.iter().map(|d| d.lane(bucket).remaining_hours()).sum()
    }

    /// Weekly capacity of a bucket.
    pub fn capacity_hours(&self, bucket: Bucket) -> u32 {
        self.days.iter().map(|d| d.lane(bucket).capacity_hours).sum()
    }

    /// Hours sitting in the overflow list.
    pub fn overflow_hours(&self) -> u32 {
        self.overflow.iter().map(|e| e.task.hours_or_zero()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn task(id: u64, hours: u32) -> Task {
        Task::new(id)
            .with_project("p")
            .with_hours(hours)
            .with_score(1.0)
    }

    fn sample_result() -> ScheduleResult {
        let mut monday = DaySlot::new(0, Weekday::Mon, 4, 2);
        monday.place(Bucket::Streamable, task(1, 3), None);
        monday.place(Bucket::OffStream, task(2, 2), None);
        let mut tuesday = DaySlot::new(1, Weekday::Tue, 4, 2);
        tuesday.place(Bucket::Streamable, task(3, 4), Some("m".into()));

        let mut result = ScheduleResult::new(vec![monday, tuesday]);
        result.add_overflow(task(4, 5), OverflowReason::Capacity);
        result.add_overflow(task(5, 1), OverflowReason::ProjectCeiling);
        result
    }

    #[test]
    fn test_hours_accounting() {
        let r = sample_result();
        assert_eq!(r.utilized_hours(Bucket::Streamable), 7);
        assert_eq!(r.unused_hours(Bucket::Streamable), 1);
        assert_eq!(r.capacity_hours(Bucket::Streamable), 8);
        assert_eq!(r.utilized_hours(Bucket::OffStream), 2);
        assert_eq!(r.unused_hours(Bucket::OffStream), 2);
        assert_eq!(r.overflow_hours(), 6);
    }

    #[test]
    fn test_placement_lookup() {
        let r = sample_result();
        assert_eq!(
            r.placement_of(2),
            Some(Placement::Scheduled {
                day: 0,
                bucket: Bucket::OffStream
            })
        );
        assert_eq!(
            r.placement_of(3),
            Some(Placement::Scheduled {
                day: 1,
                bucket: Bucket::Streamable
            })
        );
        assert_eq!(
            r.placement_of(5),
            Some(Placement::Overflow(OverflowReason::ProjectCeiling))
        );
        assert_eq!(r.placement_of(99), None);
    }

    #[test]
    fn test_placed_ids_in_day_order() {
        let r = sample_result();
        assert_eq!(r.placed_task_ids(), vec![1, 2, 3]);
        assert_eq!(r.placed_count(), 3);
        assert!(!r.is_complete());
        assert_eq!(r.overflow_by_reason(OverflowReason::Capacity).len(), 1);
    }

    #[test]
    fn test_empty_result() {
        let r = ScheduleResult::default();
        assert!(r.is_complete());
        assert_eq!(r.placed_count(), 0);
        assert_eq!(r.utilized_hours(Bucket::Streamable), 0);
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(OverflowReason::Capacity.to_string(), "capacity");
        assert_eq!(OverflowReason::ProjectCeiling.to_string(), "project_ceiling");
    }
}
