//! Planning domain models.
//!
//! Value types shared by every engine stage. All of them are rebuilt
//! fresh for each planning run; none hold state between runs.
//!
//! # Domain Mappings
//!
//! | u-weekplan | Issue tracker | Calendar |
//! |------------|---------------|----------|
//! | Task | Issue | Event |
//! | MilestoneGroup | Milestone | All-day block |
//! | DaySlot | (none) | Weekday |
//! | ScheduleResult | (none) | Week plan |

mod day;
mod group;
mod schedule;
mod task;
mod tier;

pub use day::{DaySlot, Lane, ScheduledTask};
pub use group::MilestoneGroup;
pub use schedule::{
    EstimationFallback, FallbackReason, OverflowEntry, OverflowReason, Placement,
    ScheduleResult,
};
pub use task::Task;
pub use tier::{Bucket, ImportanceTier, ParseTierError, Pillar, UrgencyTier};
