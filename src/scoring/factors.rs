//! Built-in scoring factors.
//!
//! Each factor is a lookup table keyed by one of the task's enumerated
//! fields. Tables come from configuration; a lookup miss is an error.

use std::collections::BTreeMap;

use super::ScoreFactor;
use crate::error::ConfigError;
use crate::models::{ImportanceTier, Pillar, Task, UrgencyTier};

fn lookup<K: Ord + std::fmt::Display>(
    table: &'static str,
    weights: &BTreeMap<K, f64>,
    key: &K,
) -> Result<f64, ConfigError> {
    weights
        .get(key)
        .copied()
        .ok_or_else(|| ConfigError::MissingWeight {
            table,
            key: key.to_string(),
        })
}

/// Strategic weight of the task's pillar.
#[derive(Debug, Clone, PartialEq)]
pub struct PillarWeight(pub BTreeMap<Pillar, f64>);

impl ScoreFactor for PillarWeight {
    fn name(&self) -> &'static str {
        "pillar"
    }

    fn evaluate(&self, task: &Task) -> Result<f64, ConfigError> {
        lookup("pillar_weights", &self.0, &task.pillar)
    }
}

/// Multiplier for the task's urgency tier.
#[derive(Debug, Clone, PartialEq)]
pub struct UrgencyMultiplier(pub BTreeMap<UrgencyTier, f64>);

impl ScoreFactor for UrgencyMultiplier {
    fn name(&self) -> &'static str {
        "urgency"
    }

    fn evaluate(&self, task: &Task) -> Result<f64, ConfigError> {
        lookup("urgency_multipliers", &self.0, &task.urgency)
    }
}

/// Multiplier for the task's importance tier.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportanceMultiplier(pub BTreeMap<ImportanceTier, f64>);

impl ScoreFactor for ImportanceMultiplier {
    fn name(&self) -> &'static str {
        "importance"
    }

    fn evaluate(&self, task: &Task) -> Result<f64, ConfigError> {
        lookup("importance_multipliers", &self.0, &task.importance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pillar_lookup() {
        let factor = PillarWeight(BTreeMap::from([(Pillar::Revenue, 3.0)]));
        let task = Task::new(1).with_pillar(Pillar::Revenue);
        assert_eq!(factor.evaluate(&task).unwrap(), 3.0);
        assert_eq!(factor.name(), "pillar");
    }

    #[test]
    fn test_missing_key_is_error() {
        let factor = UrgencyMultiplier(BTreeMap::from([(UrgencyTier::High, 2.0)]));
        let task = Task::new(1).with_urgency(UrgencyTier::Low);
        match factor.evaluate(&task) {
            Err(ConfigError::MissingWeight { table, key }) => {
                assert_eq!(table, "urgency_multipliers");
                assert_eq!(key, "low");
            }
            other => panic!("expected MissingWeight, got {other:?}"),
        }
    }

    #[test]
    fn test_importance_lookup() {
        let factor = ImportanceMultiplier(BTreeMap::from([
            (ImportanceTier::Blocking, 5.0),
            (ImportanceTier::Low, 0.5),
        ]));
        let task = Task::new(1).with_importance(ImportanceTier::Blocking);
        assert_eq!(factor.evaluate(&task).unwrap(), 5.0);
    }
}
