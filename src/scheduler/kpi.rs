//! Week quality metrics (KPIs).
//!
//! Computes summary indicators from a packed week.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placed Hours | Sum of hours across all lanes |
//! | Overflow Hours | Sum of hours of deferred tasks |
//! | Stream Utilization | Used / capacity over all stream lanes |
//! | Off-Stream Utilization | Used / capacity over all off-stream lanes |
//! | Open Stream Hours | Unused stream hours (open exploration time) |
//! | Cohesive Days | Days whose stream lane holds exactly one milestone group |
//! | Max Projects | Most distinct projects on any single day |

use serde::{Deserialize, Serialize};

use crate::models::{Bucket, OverflowReason, ScheduleResult};

/// Week performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekKpi {
    /// Tasks placed.
    pub placed_tasks: usize,
    /// Hours placed across both buckets.
    pub placed_hours: u32,
    /// Tasks deferred.
    pub overflow_tasks: usize,
    /// Hours deferred.
    pub overflow_hours: u32,
    /// Deferred for lack of hours.
    pub overflow_capacity: usize,
    /// Deferred by the project ceiling.
    pub overflow_project_ceiling: usize,
    /// Stream utilization over the week (0.0..=1.0).
    pub stream_utilization: f64,
    /// Off-stream utilization over the week (0.0..=1.0).
    pub off_stream_utilization: f64,
    /// Unused stream hours.
    pub open_stream_hours: u32,
    /// Days whose stream lane is a single milestone group.
    pub cohesive_days: usize,
    /// Largest distinct-project count on any day.
    pub max_projects_in_a_day: usize,
    /// Estimates that fell back to the default.
    pub estimation_fallbacks: usize,
}

impl WeekKpi {
    /// Computes KPIs from a packed week.
    pub fn calculate(result: &ScheduleResult) -> Self {
        let stream_used = result.utilized_hours(Bucket::Streamable);
        let off_used = result.utilized_hours(Bucket::OffStream);

        Self {
            placed_tasks: result.placed_count(),
            placed_hours: stream_used + off_used,
            overflow_tasks: result.overflow.len(),
            overflow_hours: result.overflow_hours(),
            overflow_capacity: result.overflow_by_reason(OverflowReason::Capacity).len(),
            overflow_project_ceiling: result
                .overflow_by_reason(OverflowReason::ProjectCeiling)
                .len(),
            stream_utilization: ratio(stream_used, result.capacity_hours(Bucket::Streamable)),
            off_stream_utilization: ratio(off_used, result.capacity_hours(Bucket::OffStream)),
            open_stream_hours: result.unused_hours(Bucket::Streamable),
            cohesive_days: result
                .days
                .iter()
                .filter(|d| d.cohesive_milestone().is_some())
                .count(),
            max_projects_in_a_day: result
                .days
                .iter()
                .map(|d| d.project_count())
                .max()
                .unwrap_or(0),
            estimation_fallbacks: result.estimation_fallbacks.len(),
        }
    }

    /// Whether the week meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_overflow_hours: u32, min_stream_utilization: f64) -> bool {
        self.overflow_hours <= max_overflow_hours
            && self.stream_utilization >= min_stream_utilization
    }
}

fn ratio(used: u32, capacity: u32) -> f64 {
    if capacity == 0 {
        0.0
    } else {
        used as f64 / capacity as f64
    }
}
