//! Day slot model.
//!
//! A day exposes two independent hour budgets (streamable and off-stream)
//! and tracks which projects it already touches, so the packer can hold
//! the per-day project ceiling.
//!
//! # Capacity Model
//! Hours are whole numbers. A lane accepts a task iff
//! `used_hours + task.hours <= capacity_hours`; used hours never exceed
//! capacity.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Bucket, Task};

/// A task as placed on a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// The placed task (copied from the input).
    pub task: Task,
    /// Milestone group the task was placed with, if placed atomically.
    pub group_id: Option<String>,
}

impl ScheduledTask {
    /// Placed hours.
    #[inline]
    pub fn hours(&self) -> u32 {
        self.task.hours_or_zero()
    }
}

/// One hour budget within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// Configured budget (hours).
    pub capacity_hours: u32,
    /// Hours assigned so far.
    pub used_hours: u32,
    /// Assigned tasks, in placement order.
    pub tasks: Vec<ScheduledTask>,
}

impl Lane {
    /// Creates an empty lane.
    pub fn new(capacity_hours: u32) -> Self {
        Self {
            capacity_hours,
            used_hours: 0,
            tasks: Vec::new(),
        }
    }

    /// Hours still available.
    #[inline]
    pub fn remaining_hours(&self) -> u32 {
        self.capacity_hours.saturating_sub(self.used_hours)
    }

    /// Whether `hours` more would fit.
    #[inline]
    pub fn fits(&self, hours: u32) -> bool {
        hours <= self.remaining_hours()
    }

    /// Used fraction of capacity (0.0..=1.0). Zero capacity reports 0.0.
    pub fn utilization(&self) -> f64 {
        if self.capacity_hours == 0 {
            return 0.0;
        }
        self.used_hours as f64 / self.capacity_hours as f64
    }

    fn push(&mut self, scheduled: ScheduledTask) {
        self.used_hours += scheduled.hours();
        self.tasks.push(scheduled);
    }
}

/// One planning day with a streamable and an off-stream lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySlot {
    /// Position in the week (0-based).
    pub index: usize,
    /// Weekday label.
    pub weekday: Weekday,
    /// Calendar date, when the week start is known.
    pub date: Option<NaiveDate>,
    /// Streamable budget.
    pub stream: Lane,
    /// Off-stream budget.
    pub off_stream: Lane,
    /// Distinct projects placed on this day (both lanes).
    pub projects: BTreeSet<String>,
}

impl DaySlot {
    /// Creates an empty day.
    pub fn new(index: usize, weekday: Weekday, stream_hours: u32, off_stream_hours: u32) -> Self {
        Self {
            index,
            weekday,
            date: None,
            stream: Lane::new(stream_hours),
            off_stream: Lane::new(off_stream_hours),
            projects: BTreeSet::new(),
        }
    }

    /// Sets the calendar date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// The lane for a bucket.
    pub fn lane(&self, bucket: Bucket) -> &Lane {
        match bucket {
            Bucket::Streamable => &self.stream,
            Bucket::OffStream => &self.off_stream,
        }
    }

    fn lane_mut(&mut self, bucket: Bucket) -> &mut Lane {
        match bucket {
            Bucket::Streamable => &mut self.stream,
            Bucket::OffStream => &mut self.off_stream,
        }
    }

    /// Number of distinct projects on this day.
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// Distinct project count after adding `projects`.
    pub fn project_count_with<'a>(&self, projects: impl IntoIterator<Item = &'a str>) -> usize {
        let added = projects
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter(|p| !self.projects.contains(*p))
            .count();
        self.projects.len() + added
    }

    /// Whether adding `projects` keeps the day within `max_projects`.
    pub fn admits_projects<'a>(
        &self,
        projects: impl IntoIterator<Item = &'a str>,
        max_projects: usize,
    ) -> bool {
        self.project_count_with(projects) <= max_projects
    }

    /// Places a task into the lane for `bucket`.
    ///
    /// The caller checks capacity and the project ceiling first; this only
    /// records the placement.
    pub fn place(&mut self, bucket: Bucket, task: Task, group_id: Option<String>) {
        debug_assert!(self.lane(bucket).fits(task.hours_or_zero()));
        self.projects.insert(task.project.clone());
        self.lane_mut(bucket).push(ScheduledTask { task, group_id });
    }

    /// Hours used across both lanes.
    pub fn utilized_hours(&self) -> u32 {
        self.stream.used_hours + self.off_stream.used_hours
    }

    /// Hours left across both lanes.
    pub fn unused_hours(&self) -> u32 {
        self.stream.remaining_hours() + self.off_stream.remaining_hours()
    }

    /// All placed tasks, stream lane first.
    pub fn scheduled(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.stream.tasks.iter().chain(self.off_stream.tasks.iter())
    }

    /// Milestone group that owns the whole stream lane, if any.
    ///
    /// `Some` when the lane is non-empty and every stream task was placed
    /// with the same group.
    pub fn cohesive_milestone(&self) -> Option<&str> {
        let first = self.stream.tasks.first()?.group_id.as_deref()?;
        self.stream
            .tasks
            .iter()
            .all(|s| s.group_id.as_deref() == Some(first))
            .then_some(first)
    }
}
