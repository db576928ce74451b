//! Deterministic greedy week packer.
//!
//! # Algorithm
//!
//! 1. Sort off-stream tasks by priority and place each on the first day
//!    (calendar order) whose off-stream lane fits it and whose project
//!    set stays within the ceiling.
//! 2. Sort viable milestone groups by priority and place each whole group
//!    on the first day whose stream lane fits the group's total hours and
//!    whose project set can absorb the group's projects. A group that fits
//!    nowhere is broken up and its members join step 3.
//! 3. Sort the remaining streamable tasks (ungrouped plus deferred members)
//!    by priority and place each individually, like step 1.
//!
//! A task that fits no day goes to overflow. The reason is
//! `project_ceiling` when some day had the hours but every such day was
//! blocked by the ceiling, and `capacity` otherwise.
//!
//! Every sort uses the tie-break chain in [`crate::scoring`], and days are
//! scanned in index order, so the same input always packs the same way.
//!
//! # Complexity
//! O(n log n + n * d) where n = tasks, d = days.
//!
//! # Reference
//! Johnson et al. (1974), "Worst-Case Performance Bounds for Simple
//! One-Dimensional Packing Algorithms", SIAM J. Comput. 3(4) (First Fit)

use chrono::{Datelike, Days, NaiveDate, Weekday};
use tracing::{debug, info, instrument};

use crate::config::PlannerConfig;
use crate::error::{ConfigError, PlanError};
use crate::models::{
    Bucket, DaySlot, MilestoneGroup, OverflowReason, ScheduleResult, Task,
};
use crate::scoring::{compare_groups, sort_tasks};
use crate::validation::validate_packable;

/// Week packer.
///
/// # Example
///
/// ```
/// use u_weekplan::models::{Bucket, Task};
/// use u_weekplan::scheduler::Packer;
///
/// let tasks: Vec<Task> = (1..=3)
///     .map(|id| {
///         Task::new(id)
///             .with_hours(1)
///             .with_bucket(Bucket::OffStream)
///             .with_score(1.0)
///     })
///     .collect();
///
/// let result = Packer::new(5, 4, 2, 3).unwrap().pack(&tasks, &[]).unwrap();
/// assert!(result.is_complete());
/// assert_eq!(result.days[0].off_stream.used_hours, 2);
/// assert_eq!(result.days[1].off_stream.used_hours, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packer {
    days: usize,
    stream_capacity: u32,
    off_stream_capacity: u32,
    max_projects_per_day: usize,
    max_task_hours: u32,
    week_start: Option<NaiveDate>,
}

/// Per-task hour ceiling when none is configured.
pub const DEFAULT_MAX_TASK_HOURS: u32 = 8;

impl Packer {
    /// Creates a packer for `days` days with the given per-day budgets.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidDayCount`] unless `days` is in `1..=7`
    /// - [`ConfigError::NonPositiveCapacity`] for a zero budget
    /// - [`ConfigError::InvalidProjectCeiling`] for a zero ceiling
    pub fn new(
        days: usize,
        stream_capacity: u32,
        off_stream_capacity: u32,
        max_projects_per_day: usize,
    ) -> Result<Self, ConfigError> {
        if days == 0 || days > 7 {
            return Err(ConfigError::InvalidDayCount(days));
        }
        if stream_capacity == 0 {
            return Err(ConfigError::NonPositiveCapacity {
                field: "stream_hours_per_day",
            });
        }
        if off_stream_capacity == 0 {
            return Err(ConfigError::NonPositiveCapacity {
                field: "off_stream_hours_per_day",
            });
        }
        if max_projects_per_day == 0 {
            return Err(ConfigError::InvalidProjectCeiling);
        }
        Ok(Self {
            days,
            stream_capacity,
            off_stream_capacity,
            max_projects_per_day,
            max_task_hours: DEFAULT_MAX_TASK_HOURS,
            week_start: None,
        })
    }

    /// Builds a packer from the planner configuration.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, ConfigError> {
        let packer = Self::new(
            config.days_per_week,
            config.stream_hours_per_day,
            config.off_stream_hours_per_day,
            config.max_projects_per_day,
        )?
        .with_max_task_hours(config.max_estimate_hours)?;
        Ok(match config.week_start {
            Some(date) => packer.with_week_start(date),
            None => packer,
        })
    }

    /// Sets the largest hour count a single task may carry.
    pub fn with_max_task_hours(mut self, max_hours: u32) -> Result<Self, ConfigError> {
        if max_hours == 0 {
            return Err(ConfigError::NonPositiveCapacity {
                field: "max_estimate_hours",
            });
        }
        self.max_task_hours = max_hours;
        Ok(self)
    }

    /// Labels days with dates starting at `date`.
    ///
    /// Weekdays follow the date instead of starting on Monday.
    pub fn with_week_start(mut self, date: NaiveDate) -> Self {
        self.week_start = Some(date);
        self
    }

    /// Number of planning days.
    pub fn days(&self) -> usize {
        self.days
    }

    /// Distinct-project ceiling per day.
    pub fn max_projects_per_day(&self) -> usize {
        self.max_projects_per_day
    }

    /// Per-task hour ceiling.
    pub fn max_task_hours(&self) -> u32 {
        self.max_task_hours
    }

    /// Packs tasks and viable groups into the week.
    ///
    /// `tasks` holds every task not in a group (off-stream and ungrouped
    /// streamable). Inputs are not modified; placed tasks are copies.
    ///
    /// # Errors
    /// [`PlanError::InvariantViolation`] when any task is missing hours,
    /// bucket, or score, has hours outside `1..=max_task_hours`, or a group
    /// is inconsistent.
    #[instrument(skip_all, fields(
        tasks = tasks.len(),
        groups = groups.len(),
        days = self.days
    ))]
    pub fn pack(
        &self,
        tasks: &[Task],
        groups: &[MilestoneGroup],
    ) -> Result<ScheduleResult, PlanError> {
        validate_packable(tasks, groups, self.max_task_hours)
            .map_err(PlanError::InvariantViolation)?;

        let mut result = ScheduleResult::new(self.build_days());
        let (mut stream, mut off_stream): (Vec<Task>, Vec<Task>) =
            tasks.iter().cloned().partition(Task::is_streamable);

        sort_tasks(&mut off_stream);
        for task in off_stream {
            self.place_task(&mut result, Bucket::OffStream, task);
        }

        let mut ordered: Vec<&MilestoneGroup> = groups.iter().collect();
        ordered.sort_by(|a, b| compare_groups(a, b));
        for group in ordered {
            if !self.place_group(&mut result, group) {
                debug!(group = %group.id, hours = group.total_hours, "group deferred");
                stream.extend(group.tasks.iter().cloned());
            }
        }

        sort_tasks(&mut stream);
        for task in stream {
            self.place_task(&mut result, Bucket::Streamable, task);
        }

        info!(
            placed = result.placed_count(),
            overflow = result.overflow.len(),
            stream_hours = result.utilized_hours(Bucket::Streamable),
            off_stream_hours = result.utilized_hours(Bucket::OffStream),
            "week packed"
        );
        Ok(result)
    }

    fn build_days(&self) -> Vec<DaySlot> {
        let mut weekday = self.week_start.map_or(Weekday::Mon, |d| d.weekday());
        (0..self.days)
            .map(|index| {
                let mut day = DaySlot::new(
                    index,
                    weekday,
                    self.stream_capacity,
                    self.off_stream_capacity,
                );
                let date = self
                    .week_start
                    .and_then(|start| start.checked_add_days(Days::new(index as u64)));
                if let Some(date) = date {
                    day = day.with_date(date);
                }
                weekday = weekday.succ();
                day
            })
            .collect()
    }

    fn place_group(&self, result: &mut ScheduleResult, group: &MilestoneGroup) -> bool {
        let projects = group.projects();
        let slot = result.days.iter().position(|day| {
            day.stream.fits(group.total_hours)
                && day.admits_projects(projects.iter().copied(), self.max_projects_per_day)
        });
        let Some(index) = slot else {
            return false;
        };

        debug!(group = %group.id, day = index, hours = group.total_hours, "group placed");
        let day = &mut result.days[index];
        for task in &group.tasks {
            day.place(Bucket::Streamable, task.clone(), Some(group.id.clone()));
        }
        true
    }

    fn place_task(&self, result: &mut ScheduleResult, bucket: Bucket, task: Task) {
        match find_slot(&result.days, bucket, &task, self.max_projects_per_day) {
            Ok(index) => {
                debug!(task_id = task.id, day = index, %bucket, "task placed");
                result.days[index].place(bucket, task, None);
            }
            Err(reason) => {
                debug!(task_id = task.id, %bucket, %reason, "task overflowed");
                result.add_overflow(task, reason);
            }
        }
    }
}

impl Default for Packer {
    fn default() -> Self {
        Self {
            days: 5,
            stream_capacity: 4,
            off_stream_capacity: 2,
            max_projects_per_day: 3,
            max_task_hours: DEFAULT_MAX_TASK_HOURS,
            week_start: None,
        }
    }
}

/// First day that takes `task` in the lane for `bucket`.
fn find_slot(
    days: &[DaySlot],
    bucket: Bucket,
    task: &Task,
    max_projects: usize,
) -> Result<usize, OverflowReason> {
    let hours = task.hours_or_zero();
    let mut blocked_by_ceiling = false;
    for (index, day) in days.iter().enumerate() {
        if !day.lane(bucket).fits(hours) {
            continue;
        }
        if day.admits_projects([task.project.as_str()], max_projects) {
            return Ok(index);
        }
        blocked_by_ceiling = true;
    }
    Err(if blocked_by_ceiling {
        OverflowReason::ProjectCeiling
    } else {
        OverflowReason::Capacity
    })
}
