//! Planner configuration.
//!
//! Loaded from the `weekly_planner` section of a YAML document. Every
//! field has a default, so an empty section yields a working planner.
//! A map field given in the document replaces the default map entirely;
//! omitting a key from it is reported by [`PlannerConfig::validate`].
//!
//! # Example
//!
//! ```
//! use u_weekplan::config::PlannerConfig;
//!
//! let yaml = r#"
//! weekly_planner:
//!   stream_hours_per_day: 6
//!   max_projects_per_day: 2
//! "#;
//! let config = PlannerConfig::from_yaml_str(yaml).unwrap();
//! assert_eq!(config.stream_hours_per_day, 6);
//! assert_eq!(config.off_stream_hours_per_day, 2);
//! assert!(config.validate().is_ok());
//! ```

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::models::{ImportanceTier, Pillar, UrgencyTier};

/// Estimate patterns shipped by default, highest priority first.
///
/// Capture group 1 holds the hour count.
pub const DEFAULT_ESTIMATE_PATTERNS: &[&str] = &[
    r"(?i)\bestimated?:\s*(\d+)\s*(?:h|hours?|hrs?)\b",
    r"(?i)\btime:\s*(\d+)\s*(?:h|hours?|hrs?)\b",
    r"(?i)\beffort:\s*(\d+)\s*(?:h|hours?|hrs?)\b",
    r"(?i)\[(\d+)h\]",
    r"(?i)\[(\d+)\s*hours?\]",
];

/// Planner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Ordered estimate patterns; the first match wins.
    #[serde(default = "default_estimate_patterns")]
    pub estimate_patterns: Vec<String>,
    /// Hours used when no valid estimate is found.
    #[serde(default = "default_estimate_hours")]
    pub default_estimate_hours: u32,
    /// Upper clamp for extracted estimates.
    #[serde(default = "default_max_estimate_hours")]
    pub max_estimate_hours: u32,
    /// Label marking a task as streamable (compared case-insensitively).
    #[serde(default = "default_streamable_label")]
    pub streamable_label: String,
    /// Number of planning days.
    #[serde(default = "default_days_per_week")]
    pub days_per_week: usize,
    /// Streamable budget per day (hours).
    #[serde(default = "default_stream_hours_per_day")]
    pub stream_hours_per_day: u32,
    /// Off-stream budget per day (hours).
    #[serde(default = "default_off_stream_hours_per_day")]
    pub off_stream_hours_per_day: u32,
    /// Distinct-project ceiling per day.
    #[serde(default = "default_max_projects_per_day")]
    pub max_projects_per_day: usize,
    /// Milestone cohesion target (hours).
    #[serde(default = "default_milestone_target_hours")]
    pub milestone_target_hours: u32,
    /// Hours below the target still considered cohesive.
    #[serde(default = "default_milestone_tolerance")]
    pub milestone_tolerance_below: u32,
    /// Hours above the target still considered cohesive.
    #[serde(default = "default_milestone_tolerance")]
    pub milestone_tolerance_above: u32,
    /// Weight per pillar.
    #[serde(default = "default_pillar_weights")]
    pub pillar_weights: BTreeMap<Pillar, f64>,
    /// Multiplier per urgency tier.
    #[serde(default = "default_urgency_multipliers")]
    pub urgency_multipliers: BTreeMap<UrgencyTier, f64>,
    /// Multiplier per importance tier.
    #[serde(default = "default_importance_multipliers")]
    pub importance_multipliers: BTreeMap<ImportanceTier, f64>,
    /// Date of the first planning day, for labelling only.
    #[serde(default)]
    pub week_start: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    weekly_planner: Option<PlannerConfig>,
}

fn default_estimate_patterns() -> Vec<String> {
    DEFAULT_ESTIMATE_PATTERNS.iter().map(|p| p.to_string()).collect()
}

fn default_estimate_hours() -> u32 {
    1
}

fn default_max_estimate_hours() -> u32 {
    8
}

fn default_streamable_label() -> String {
    "streamable".to_string()
}

fn default_days_per_week() -> usize {
    5
}

fn default_stream_hours_per_day() -> u32 {
    4
}

fn default_off_stream_hours_per_day() -> u32 {
    2
}

fn default_max_projects_per_day() -> usize {
    3
}

fn default_milestone_target_hours() -> u32 {
    4
}

fn default_milestone_tolerance() -> u32 {
    1
}

fn default_pillar_weights() -> BTreeMap<Pillar, f64> {
    BTreeMap::from([
        (Pillar::Revenue, 3.0),
        (Pillar::Infrastructure, 2.0),
        (Pillar::Consistency, 1.5),
        (Pillar::Innovation, 1.2),
        (Pillar::Cleanup, 1.0),
    ])
}

fn default_urgency_multipliers() -> BTreeMap<UrgencyTier, f64> {
    BTreeMap::from([
        (UrgencyTier::Critical, 4.0),
        (UrgencyTier::High, 2.0),
        (UrgencyTier::Medium, 1.0),
        (UrgencyTier::Low, 0.5),
    ])
}

fn default_importance_multipliers() -> BTreeMap<ImportanceTier, f64> {
    BTreeMap::from([
        (ImportanceTier::Blocking, 5.0),
        (ImportanceTier::High, 2.0),
        (ImportanceTier::Medium, 1.0),
        (ImportanceTier::Low, 0.5),
    ])
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            estimate_patterns: default_estimate_patterns(),
            default_estimate_hours: default_estimate_hours(),
            max_estimate_hours: default_max_estimate_hours(),
            streamable_label: default_streamable_label(),
            days_per_week: default_days_per_week(),
            stream_hours_per_day: default_stream_hours_per_day(),
            off_stream_hours_per_day: default_off_stream_hours_per_day(),
            max_projects_per_day: default_max_projects_per_day(),
            milestone_target_hours: default_milestone_target_hours(),
            milestone_tolerance_below: default_milestone_tolerance(),
            milestone_tolerance_above: default_milestone_tolerance(),
            pillar_weights: default_pillar_weights(),
            urgency_multipliers: default_urgency_multipliers(),
            importance_multipliers: default_importance_multipliers(),
            week_start: None,
        }
    }
}

impl PlannerConfig {
    /// Parses the `weekly_planner` section of a YAML document.
    ///
    /// A document without that section yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let document: ConfigDocument = serde_yaml::from_str(yaml)?;
        Ok(document.weekly_planner.unwrap_or_default())
    }

    /// Loads the `weekly_planner` section from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Checks every constraint the engine relies on.
    ///
    /// Returns the first problem found. Patterns are compiled here so a
    /// malformed list is rejected before any task is estimated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days_per_week == 0 || self.days_per_week > 7 {
            return Err(ConfigError::InvalidDayCount(self.days_per_week));
        }
        if self.stream_hours_per_day == 0 {
            return Err(ConfigError::NonPositiveCapacity {
                field: "stream_hours_per_day",
            });
        }
        if self.off_stream_hours_per_day == 0 {
            return Err(ConfigError::NonPositiveCapacity {
                field: "off_stream_hours_per_day",
            });
        }
        if self.max_estimate_hours == 0 {
            return Err(ConfigError::NonPositiveCapacity {
                field: "max_estimate_hours",
            });
        }
        if self.max_projects_per_day == 0 {
            return Err(ConfigError::InvalidProjectCeiling);
        }
        if self.default_estimate_hours == 0 || self.default_estimate_hours > self.max_estimate_hours
        {
            return Err(ConfigError::InvalidEstimateBounds {
                default: self.default_estimate_hours,
                max: self.max_estimate_hours,
            });
        }
        if self.streamable_label.trim().is_empty() {
            return Err(ConfigError::EmptyStreamableLabel);
        }
        if self.milestone_target_hours == 0
            || self.milestone_tolerance_below > self.milestone_target_hours
        {
            return Err(ConfigError::InvalidCohesionWindow {
                target: self.milestone_target_hours,
                below: self.milestone_tolerance_below,
                above: self.milestone_tolerance_above,
            });
        }

        check_table("pillar_weights", Pillar::ALL, &self.pillar_weights)?;
        check_table(
            "urgency_multipliers",
            UrgencyTier::ALL,
            &self.urgency_multipliers,
        )?;
        check_table(
            "importance_multipliers",
            ImportanceTier::ALL,
            &self.importance_multipliers,
        )?;

        compile_patterns(&self.estimate_patterns)?;
        Ok(())
    }
}

/// Verifies a weight table covers every variant with a usable value.
pub(crate) fn check_table<K: Ord + Display>(
    table: &'static str,
    keys: &[K],
    weights: &BTreeMap<K, f64>,
) -> Result<(), ConfigError> {
    for key in keys {
        match weights.get(key) {
            None => {
                return Err(ConfigError::MissingWeight {
                    table,
                    key: key.to_string(),
                })
            }
            Some(&value) if !value.is_finite() || value < 0.0 => {
                return Err(ConfigError::InvalidWeight {
                    table,
                    key: key.to_string(),
                    value,
                })
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Compiles estimate patterns in order, rejecting any without a capture group.
pub(crate) fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .enumerate()
        .map(|(index, pattern)| {
            let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                index,
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
            // captures_len counts the implicit whole-match group
            if regex.captures_len() < 2 {
                return Err(ConfigError::PatternWithoutCapture {
                    index,
                    pattern: pattern.clone(),
                });
            }
            Ok(regex)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.days_per_week, 5);
        assert_eq!(config.stream_hours_per_day, 4);
        assert_eq!(config.off_stream_hours_per_day, 2);
        assert_eq!(config.default_estimate_hours, 1);
        assert_eq!(config.max_estimate_hours, 8);
        assert_eq!(config.estimate_patterns.len(), 5);
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = PlannerConfig::from_yaml_str("github:\n  user: someone\n").unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = r#"
weekly_planner:
  streamable_label: "Live"
  days_per_week: 4
  milestone_tolerance_above: 2
  week_start: 2026-10-19
  urgency_multipliers:
    critical: 10.0
    high: 3.0
    medium: 1.0
    low: 0.25
"#;
        let config = PlannerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.streamable_label, "Live");
        assert_eq!(config.days_per_week, 4);
        assert_eq!(config.milestone_tolerance_above, 2);
        assert_eq!(config.milestone_tolerance_below, 1);
        assert_eq!(
            config.week_start,
            NaiveDate::from_ymd_opt(2026, 10, 19)
        );
        assert_eq!(config.urgency_multipliers[&UrgencyTier::Critical], 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_weight_table_is_rejected() {
        let yaml = r#"
weekly_planner:
  pillar_weights:
    revenue: 3.0
    cleanup: 1.0
"#;
        let config = PlannerConfig::from_yaml_str(yaml).unwrap();
        match config.validate() {
            Err(ConfigError::MissingWeight { table, key }) => {
                assert_eq!(table, "pillar_weights");
                assert_eq!(key, "infrastructure");
            }
            other => panic!("expected MissingWeight, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_enum_key_is_parse_error() {
        let yaml = r#"
weekly_planner:
  pillar_weights:
    marketing: 2.0
"#;
        assert!(matches!(
            PlannerConfig::from_yaml_str(yaml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let mut config = PlannerConfig::default();
        config.importance_multipliers.insert(ImportanceTier::Low, -1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeight { table: "importance_multipliers", .. })
        ));
    }

    #[test]
    fn test_non_positive_capacity() {
        let mut config = PlannerConfig::default();
        config.off_stream_hours_per_day = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveCapacity {
                field: "off_stream_hours_per_day"
            })
        ));
    }

    #[test]
    fn test_bounds_checks() {
        let mut config = PlannerConfig::default();
        config.days_per_week = 8;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDayCount(8))));

        let mut config = PlannerConfig::default();
        config.default_estimate_hours = 9;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEstimateBounds { default: 9, max: 8 })
        ));

        let mut config = PlannerConfig::default();
        config.max_projects_per_day = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidProjectCeiling)));

        let mut config = PlannerConfig::default();
        config.streamable_label = "  ".into();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyStreamableLabel)));

        let mut config = PlannerConfig::default();
        config.milestone_tolerance_below = 5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCohesionWindow { .. })
        ));
    }

    #[test]
    fn test_malformed_patterns() {
        let mut config = PlannerConfig::default();
        config.estimate_patterns = vec![r"Estimate: (\d+".into()];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPattern { index: 0, .. })
        ));

        config.estimate_patterns = vec![r"(\d+)h".into(), r"\d+ hours".into()];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PatternWithoutCapture { index: 1, .. })
        ));
    }

    #[test]
    fn test_empty_pattern_list_is_valid() {
        let mut config = PlannerConfig::default();
        config.estimate_patterns.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = PlannerConfig::from_yaml_file("/nonexistent/weekplan.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
