//! Input validation for packing.
//!
//! Checks that every task reaching the packer has been through the
//! estimator, classifier, and scorer, and that milestone groups are
//! consistent with their members. Detects:
//! - Duplicate task IDs (across individual tasks and group members)
//! - Missing, zero, or above-maximum hours
//! - Missing bucket or score, and non-finite or negative scores
//! - Group members that are off-stream or carry another milestone
//! - Group totals that disagree with their members
//!
//! All problems are collected, not just the first one, so an upstream
//! bug shows its full extent in a single failure.

use std::collections::HashSet;
use std::fmt;

use crate::models::{Bucket, MilestoneGroup, Task};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// A task was never estimated.
    MissingHours,
    /// A task carries zero hours.
    NonPositiveHours,
    /// A task carries more hours than the estimate ceiling.
    HoursAboveMax,
    /// A task was never classified.
    MissingBucket,
    /// A task was never scored.
    MissingScore,
    /// A score is negative, NaN, or infinite.
    InvalidScore,
    /// A group member is not streamable.
    GroupMemberNotStreamable,
    /// A group member's milestone differs from the group key.
    GroupMemberMilestoneMismatch,
    /// A group's `total_hours` differs from the sum of member hours.
    GroupHoursMismatch,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates packer input.
///
/// Checks:
/// 1. No duplicate IDs across `tasks` and all group members
/// 2. Every task has `hours` in `1..=max_hours`, a bucket, and a finite
///    non-negative score
/// 3. Every group member is streamable and carries the group's milestone
/// 4. Every group's `total_hours` equals the sum of its members' hours
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_packable(
    tasks: &[Task],
    groups: &[MilestoneGroup],
    max_hours: u32,
) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    let members = groups.iter().flat_map(|g| g.tasks.iter());
    for task in tasks.iter().chain(members) {
        if !seen.insert(task.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: #{}", task.id),
            ));
        }
        check_task(task, max_hours, &mut errors);
    }

    for group in groups {
        for task in &group.tasks {
            if task.bucket != Some(Bucket::Streamable) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::GroupMemberNotStreamable,
                    format!("Task #{} in group '{}' is not streamable", task.id, group.id),
                ));
            }
            if task.milestone.as_deref() != Some(group.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::GroupMemberMilestoneMismatch,
                    format!(
                        "Task #{} in group '{}' has milestone {:?}",
                        task.id, group.id, task.milestone
                    ),
                ));
            }
        }

        let sum = group
            .tasks
            .iter()
            .map(Task::hours_or_zero)
            .fold(0u32, u32::saturating_add);
        if sum != group.total_hours {
            errors.push(ValidationError::new(
                ValidationErrorKind::GroupHoursMismatch,
                format!(
                    "Group '{}' declares {}h but members sum to {}h",
                    group.id, group.total_hours, sum
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_task(task: &Task, max_hours: u32, errors: &mut Vec<ValidationError>) {
    match task.hours {
        None => errors.push(ValidationError::new(
            ValidationErrorKind::MissingHours,
            format!("Task #{} has no estimate", task.id),
        )),
        Some(0) => errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveHours,
            format!("Task #{} has zero hours", task.id),
        )),
        Some(h) if h > max_hours => errors.push(ValidationError::new(
            ValidationErrorKind::HoursAboveMax,
            format!("Task #{} has {h}h, above the {max_hours}h maximum", task.id),
        )),
        Some(_) => {}
    }

    if task.bucket.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingBucket,
            format!("Task #{} has no bucket", task.id),
        ));
    }

    match task.score {
        None => errors.push(ValidationError::new(
            ValidationErrorKind::MissingScore,
            format!("Task #{} has no score", task.id),
        )),
        Some(s) if !s.is_finite() || s < 0.0 => errors.push(ValidationError::new(
            ValidationErrorKind::InvalidScore,
            format!("Task #{} has invalid score {s}", task.id),
        )),
        Some(_) => {}
    }
}
