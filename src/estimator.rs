//! Hour estimate extraction from issue bodies.
//!
//! Applies an ordered list of regular expressions to the body text. The
//! first pattern that matches decides the estimate; later patterns are
//! never consulted, even if they would yield a different value.
//!
//! # Normalization
//! 1. Absent or blank body → default.
//! 2. No pattern matches → default.
//! 3. The captured value is taken as an absolute value.
//! 4. Zero → default; above the maximum → the maximum.
//!
//! # Example
//!
//! ```
//! use u_weekplan::estimator::Estimator;
//!
//! let estimator = Estimator::with_defaults();
//! assert_eq!(estimator.extract_estimate("Estimate: 3 hours"), 3);
//! assert_eq!(estimator.extract_estimate("[2h] Build feature"), 2);
//! assert_eq!(estimator.extract_estimate("No estimate here"), 1);
//! assert_eq!(estimator.extract_estimate("Estimate: 20 hours"), 8);
//! ```

use regex::Regex;
use tracing::debug;

use crate::config::{compile_patterns, PlannerConfig, DEFAULT_ESTIMATE_PATTERNS};
use crate::error::ConfigError;
use crate::models::{EstimationFallback, FallbackReason, Task};

/// Where an estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateSource {
    /// Pattern `index` matched with an in-range value.
    Pattern { index: usize },
    /// Pattern `index` matched a value above the maximum.
    Clamped { index: usize, raw: u64 },
    /// The default was used.
    Fallback(FallbackReason),
}

/// An extracted estimate and its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimate {
    /// Hours, always in `1..=max_hours`.
    pub hours: u32,
    /// Provenance.
    pub source: EstimateSource,
}

impl Estimate {
    /// The fallback reason, if the default was used.
    pub fn fallback(&self) -> Option<FallbackReason> {
        match self.source {
            EstimateSource::Fallback(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Ordered-pattern estimate extractor.
#[derive(Debug, Clone)]
pub struct Estimator {
    patterns: Vec<Regex>,
    default_hours: u32,
    max_hours: u32,
}

impl Estimator {
    /// Compiles `patterns` in order.
    ///
    /// Fails if a pattern does not compile, lacks a capture group, or the
    /// bounds are inconsistent (`default_hours` must be in `1..=max_hours`).
    pub fn new<S: AsRef<str>>(
        patterns: &[S],
        default_hours: u32,
        max_hours: u32,
    ) -> Result<Self, ConfigError> {
        if max_hours == 0 {
            return Err(ConfigError::NonPositiveCapacity {
                field: "max_estimate_hours",
            });
        }
        if default_hours == 0 || default_hours > max_hours {
            return Err(ConfigError::InvalidEstimateBounds {
                default: default_hours,
                max: max_hours,
            });
        }
        let owned: Vec<String> = patterns.iter().map(|p| p.as_ref().to_string()).collect();
        Ok(Self {
            patterns: compile_patterns(&owned)?,
            default_hours,
            max_hours,
        })
    }

    /// Builds an estimator from the planner configuration.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.estimate_patterns.as_slice(),
            config.default_estimate_hours,
            config.max_estimate_hours,
        )
    }

    /// Estimator with the shipped patterns, default 1h, maximum 8h.
    ///
    /// # Panics
    /// Never in practice: the shipped patterns and bounds are constants
    /// covered by `test_defaults_keep_every_pattern`.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_ESTIMATE_PATTERNS, 1, 8).expect("shipped estimate patterns compile")
    }

    /// Compiled patterns, in priority order.
    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    /// Hours used when no valid estimate is found.
    pub fn default_hours(&self) -> u32 {
        self.default_hours
    }

    /// Upper clamp.
    pub fn max_hours(&self) -> u32 {
        self.max_hours
    }

    /// Extracts an hour estimate from `text`.
    pub fn extract_estimate(&self, text: &str) -> u32 {
        self.estimate(Some(text)).hours
    }

    /// Extracts an estimate and reports where it came from.
    pub fn estimate(&self, body: Option<&str>) -> Estimate {
        let text = match body.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return self.fallback(FallbackReason::MissingBody),
        };

        for (index, pattern) in self.patterns.iter().enumerate() {
            let Some(captures) = pattern.captures(text) else {
                continue;
            };
            let raw = captures.get(1).map(|m| m.as_str()).unwrap_or("");
            return match parse_magnitude(raw) {
                None => self.fallback(FallbackReason::Unparseable),
                Some(0) => self.fallback(FallbackReason::ZeroValue),
                Some(value) if value > u64::from(self.max_hours) => Estimate {
                    hours: self.max_hours,
                    source: EstimateSource::Clamped { index, raw: value },
                },
                // value <= max_hours, which fits in u32
                Some(value) => Estimate {
                    hours: value as u32,
                    source: EstimateSource::Pattern { index },
                },
            };
        }

        self.fallback(FallbackReason::NoMatch)
    }

    /// Sets `hours` on every task that has none, preserving order and all
    /// other fields. Never fails; a missing body gets the default.
    pub fn batch_extract(&self, tasks: Vec<Task>) -> Vec<Task> {
        self.batch_estimate(tasks).0
    }

    /// Like [`batch_extract`](Self::batch_extract), also returning the
    /// tasks whose estimate fell back to the default.
    pub fn batch_estimate(&self, tasks: Vec<Task>) -> (Vec<Task>, Vec<EstimationFallback>) {
        let mut fallbacks = Vec::new();
        let tasks: Vec<Task> = tasks
            .into_iter()
            .map(|mut task| {
                if task.hours.is_none() {
                    let estimate = self.estimate(task.body.as_deref());
                    if let Some(reason) = estimate.fallback() {
                        debug!(
                            task_id = task.id,
                            ?reason,
                            hours = estimate.hours,
                            "estimate fell back to default"
                        );
                        fallbacks.push(EstimationFallback {
                            task_id: task.id,
                            reason,
                        });
                    }
                    task.hours = Some(estimate.hours);
                }
                task
            })
            .collect();
        (tasks, fallbacks)
    }

    fn fallback(&self, reason: FallbackReason) -> Estimate {
        Estimate {
            hours: self.default_hours,
            source: EstimateSource::Fallback(reason),
        }
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Absolute value of a captured integer. Digit strings too large for
/// `u64` saturate; anything else is unparseable.
fn parse_magnitude(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}
