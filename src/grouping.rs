//! Milestone grouping.
//!
//! Collects streamable tasks that share a milestone into day-sized
//! [`MilestoneGroup`]s. A milestone is viable when its summed hours fall
//! inside the cohesion window `[target - below, target + above]`.
//!
//! Grouping only proposes candidates. Every task that does not end up in
//! a viable group comes back as ungrouped, and the packer works the same
//! with zero groups.
//!
//! | Task                                 | Result                    |
//! |--------------------------------------|---------------------------|
//! | off-stream                           | ungrouped                 |
//! | streamable, no milestone             | ungrouped                 |
//! | streamable, milestone outside window | ungrouped                 |
//! | streamable, milestone inside window  | member of that group      |

use std::collections::BTreeMap;

use crate::config::PlannerConfig;
use crate::models::{MilestoneGroup, Task};
use crate::scoring::{sort_groups, sort_tasks};

/// Result of a grouping pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupingOutcome {
    /// Viable groups, highest priority first.
    pub groups: Vec<MilestoneGroup>,
    /// Everything else, in input order.
    pub ungrouped: Vec<Task>,
}

impl GroupingOutcome {
    /// Number of tasks held by viable groups.
    pub fn grouped_task_count(&self) -> usize {
        self.groups.iter().map(MilestoneGroup::len).sum()
    }
}

/// Milestone grouper with a cohesion window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneGrouper {
    target_hours: u32,
    tolerance_below: u32,
    tolerance_above: u32,
}

impl MilestoneGrouper {
    /// Creates a grouper for `target_hours` with asymmetric tolerances.
    pub fn new(target_hours: u32, tolerance_below: u32, tolerance_above: u32) -> Self {
        Self {
            target_hours,
            tolerance_below,
            tolerance_above,
        }
    }

    /// Builds a grouper from the planner configuration.
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(
            config.milestone_target_hours,
            config.milestone_tolerance_below,
            config.milestone_tolerance_above,
        )
    }

    /// Target group size in hours.
    pub fn target_hours(&self) -> u32 {
        self.target_hours
    }

    /// Inclusive (min, max) hour window.
    pub fn window(&self) -> (u32, u32) {
        (
            self.target_hours.saturating_sub(self.tolerance_below),
            self.target_hours.saturating_add(self.tolerance_above),
        )
    }

    /// Whether `hours` lies inside the cohesion window.
    pub fn is_viable(&self, hours: u32) -> bool {
        let (min, max) = self.window();
        (min..=max).contains(&hours)
    }

    /// Splits tasks into viable milestone groups and ungrouped tasks.
    pub fn group(&self, tasks: Vec<Task>) -> GroupingOutcome {
        let mut totals: BTreeMap<String, u32> = BTreeMap::new();
        for task in tasks.iter().filter(|t| eligible(t)) {
            if let Some(key) = &task.milestone {
                let total = totals.entry(key.clone()).or_default();
                *total = total.saturating_add(task.hours_or_zero());
            }
        }
        totals.retain(|_, hours| self.is_viable(*hours));

        let mut members: BTreeMap<String, Vec<Task>> = BTreeMap::new();
        let mut ungrouped = Vec::new();
        for task in tasks {
            let viable_key = task
                .milestone
                .as_ref()
                .filter(|key| eligible(&task) && totals.contains_key(key.as_str()))
                .cloned();
            match viable_key {
                Some(key) => members.entry(key).or_default().push(task),
                None => ungrouped.push(task),
            }
        }

        let mut groups: Vec<MilestoneGroup> = members
            .into_iter()
            .map(|(key, mut tasks)| {
                sort_tasks(&mut tasks);
                MilestoneGroup::new(key, tasks)
            })
            .collect();
        sort_groups(&mut groups);

        GroupingOutcome { groups, ungrouped }
    }
}

impl Default for MilestoneGrouper {
    fn default() -> Self {
        Self::new(4, 1, 1)
    }
}

fn eligible(task: &Task) -> bool {
    task.is_streamable() && task.milestone.is_some()
}
