//! Progression constants and the rule set the engine runs under.
//!
//! [`Rules::default`] is the full game: twenty levels of ten questions with
//! all four operators. Smaller variants (three operators, fewer levels) are
//! just other values of [`Rules`], usually loaded from the `[rules]` table of
//! the config file.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::Operator;

pub const MAX_LEVEL: u32 = 20;
pub const QUESTIONS_PER_LEVEL: u32 = 10;
pub const BASE_TIME_LIMIT: f64 = 15.0;
pub const MIN_TIME_LIMIT: f64 = 3.0;
pub const TIME_SHRINK_RATE: f64 = 0.9;

/// Highest `max_level` a rule set may declare. Operands at this level
/// still multiply without overflowing `u32`.
pub const LEVEL_CAP: u32 = 1000;

/// At or below this many seconds left the countdown is drawn as a warning.
pub const LOW_TIME_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub max_level: u32,
    pub questions_per_level: u32,
    pub base_time_limit: f64,
    pub min_time_limit: f64,
    pub time_shrink_rate: f64,
    pub operators: Vec<Operator>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_level: MAX_LEVEL,
            questions_per_level: QUESTIONS_PER_LEVEL,
            base_time_limit: BASE_TIME_LIMIT,
            min_time_limit: MIN_TIME_LIMIT,
            time_shrink_rate: TIME_SHRINK_RATE,
            operators: Operator::ALL.to_vec(),
        }
    }
}

impl Rules {
    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.operators.is_empty() {
            return Err(ConfigError::InvalidRules("at least one operator is required"));
        }
        if self.max_level == 0 {
            return Err(ConfigError::InvalidRules("max_level must be at least 1"));
        }
        if self.max_level > LEVEL_CAP {
            return Err(ConfigError::InvalidRules("max_level must be at most 1000"));
        }
        if self.questions_per_level == 0 {
            return Err(ConfigError::InvalidRules(
                "questions_per_level must be at least 1",
            ));
        }
        if !(self.time_shrink_rate > 0.0 && self.time_shrink_rate <= 1.0) {
            return Err(ConfigError::InvalidRules(
                "time_shrink_rate must be in (0, 1]",
            ));
        }
        if !(self.min_time_limit > 0.0 && self.min_time_limit <= self.base_time_limit)
            || !self.base_time_limit.is_finite()
        {
            return Err(ConfigError::InvalidRules(
                "time limits must satisfy 0 < min_time_limit <= base_time_limit",
            ));
        }
        Ok(())
    }

    /// The time limit for the next level. Never below the floor and never
    /// above `time_limit`.
    pub fn shrink(&self, time_limit: f64) -> f64 {
        (time_limit * self.time_shrink_rate).max(self.min_time_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_are_valid() {
        assert!(Rules::default().validate().is_ok());
    }

    #[test]
    fn shrink_applies_rate_then_floor() {
        let rules = Rules::default();
        assert!((rules.shrink(15.0) - 13.5).abs() < 1e-9);
        assert_eq!(rules.shrink(3.2), MIN_TIME_LIMIT);
        assert_eq!(rules.shrink(MIN_TIME_LIMIT), MIN_TIME_LIMIT);
    }

    #[test]
    fn rejects_broken_rule_sets() {
        let no_ops = Rules {
            operators: Vec::new(),
            ..Rules::default()
        };
        assert!(no_ops.validate().is_err());

        let growing = Rules {
            time_shrink_rate: 1.5,
            ..Rules::default()
        };
        assert!(growing.validate().is_err());

        let inverted = Rules {
            min_time_limit: 20.0,
            ..Rules::default()
        };
        assert!(inverted.validate().is_err());

        let endless = Rules {
            max_level: LEVEL_CAP + 1,
            ..Rules::default()
        };
        assert!(matches!(
            endless.validate(),
            Err(ConfigError::InvalidRules(_))
        ));

        let longest = Rules {
            max_level: LEVEL_CAP,
            ..Rules::default()
        };
        assert!(longest.validate().is_ok());
    }

    #[test]
    fn partial_table_keeps_defaults() {
        let rules: Rules = toml::from_str(
            r#"
            max_level = 5
            operators = ["add", "subtract", "multiply"]
            "#,
        )
        .unwrap();
        assert_eq!(rules.max_level, 5);
        assert_eq!(rules.operators.len(), 3);
        assert_eq!(rules.questions_per_level, QUESTIONS_PER_LEVEL);
        assert_eq!(rules.base_time_limit, BASE_TIME_LIMIT);
    }
}
