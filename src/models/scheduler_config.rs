//! Tunable parameters of the scheduling algorithm.
//!
//! A config is checked once with [`SchedulerConfig::validate`] when it is
//! created, loaded or edited. `sm2::schedule` assumes it is already valid.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound for any configured interval, about a century.
/// Keeps every scheduled date inside four-digit years.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Ease factor changes applied on `Hard` (negative) and `Easy` (positive).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EaseFactorAdjustment {
    pub hard: f64,
    pub easy: f64,
}

impl Default for EaseFactorAdjustment {
    fn default() -> Self {
        Self {
            hard: -0.15,
            easy: 0.15,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Days until the first review after a successful grade.
    pub initial_interval: u32,
    /// Days until the second review after a successful grade.
    pub second_interval: u32,

    pub again_multiplier: f64,
    pub hard_multiplier: f64,
    /// Applied on top of the ease factor for `Good`.
    pub good_multiplier: f64,
    /// Bonus applied on top of the ease factor for `Easy`.
    pub easy_multiplier: f64,

    pub min_ease_factor: f64,
    pub max_ease_factor: f64,
    pub min_interval: u32,
    pub max_interval: u32,

    // Kept last so it serializes as a trailing TOML table.
    pub ease_factor_adjustment: EaseFactorAdjustment,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_interval: 1,
            second_interval: 6,
            again_multiplier: 1.0,
            hard_multiplier: 1.2,
            good_multiplier: 1.0,
            easy_multiplier: 1.3,
            min_ease_factor: 1.3,
            max_ease_factor: 2.5,
            min_interval: 1,
            max_interval: 365,
            ease_factor_adjustment: EaseFactorAdjustment::default(),
        }
    }
}

impl SchedulerConfig {
    /// Checks every invariant and hands the config back if it holds.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let positive = [
            ("initial_interval", self.initial_interval as f64),
            ("second_interval", self.second_interval as f64),
            ("again_multiplier", self.again_multiplier),
            ("hard_multiplier", self.hard_multiplier),
            ("good_multiplier", self.good_multiplier),
            ("easy_multiplier", self.easy_multiplier),
            ("min_ease_factor", self.min_ease_factor),
            ("min_interval", self.min_interval as f64),
        ];
        for (field, value) in positive {
            // NaN fails this comparison as well
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if !(self.min_ease_factor < self.max_ease_factor) {
            return Err(ConfigError::EaseFactorRange {
                min: self.min_ease_factor,
                max: self.max_ease_factor,
            });
        }

        let bounded = [
            ("initial_interval", self.initial_interval),
            ("second_interval", self.second_interval),
            ("max_interval", self.max_interval),
        ];
        for (field, value) in bounded {
            if value > MAX_INTERVAL_DAYS {
                return Err(ConfigError::IntervalTooLong {
                    field,
                    value,
                    limit: MAX_INTERVAL_DAYS,
                });
            }
        }

        if self.min_interval > self.max_interval {
            return Err(ConfigError::IntervalRange {
                min: self.min_interval,
                max: self.max_interval,
            });
        }

        Ok(self)
    }

    /// Parses a TOML document. Missing keys fall back to the defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: SchedulerConfig = toml::from_str(raw)?;
        config.validate()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: SchedulerConfig = serde_json::from_str(raw)?;
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SchedulerConfig::default().validate().unwrap();
        assert_eq!(config.initial_interval, 1);
        assert_eq!(config.second_interval, 6);
        assert_eq!(config.max_interval, 365);
        assert_eq!(config.ease_factor_adjustment.hard, -0.15);
    }

    #[test]
    fn test_rejects_inverted_ease_range() {
        let config = SchedulerConfig {
            min_ease_factor: 2.5,
            max_ease_factor: 1.3,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EaseFactorRange { .. })
        ));
    }

    #[test]
    fn test_rejects_equal_ease_bounds() {
        let config = SchedulerConfig {
            min_ease_factor: 2.0,
            max_ease_factor: 2.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_interval_range() {
        let config = SchedulerConfig {
            min_interval: 30,
            max_interval: 10,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::IntervalRange { min: 30, max: 10 })
        ));
    }

    #[test]
    fn test_rejects_intervals_beyond_limit() {
        let too_long = SchedulerConfig {
            max_interval: 3_000_000,
            ..Default::default()
        };
        assert!(matches!(
            too_long.validate(),
            Err(ConfigError::IntervalTooLong {
                field: "max_interval",
                value: 3_000_000,
                ..
            })
        ));

        let huge_second = SchedulerConfig {
            second_interval: u32::MAX,
            ..Default::default()
        };
        assert!(huge_second.validate().is_err());

        let at_limit = SchedulerConfig {
            max_interval: MAX_INTERVAL_DAYS,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_and_nan_multipliers() {
        let zero = SchedulerConfig {
            hard_multiplier: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            zero.validate(),
            Err(ConfigError::NotPositive {
                field: "hard_multiplier",
                ..
            })
        ));

        let nan = SchedulerConfig {
            easy_multiplier: f64::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());

        let zero_interval = SchedulerConfig {
            min_interval: 0,
            ..Default::default()
        };
        assert!(zero_interval.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SchedulerConfig::from_toml_str(
            r#"
max_interval = 120
easy_multiplier = 1.5

[ease_factor_adjustment]
hard = -0.2
easy = 0.1
"#,
        )
        .unwrap();

        assert_eq!(config.max_interval, 120);
        assert_eq!(config.easy_multiplier, 1.5);
        assert_eq!(config.ease_factor_adjustment.hard, -0.2);
        assert_eq!(config.second_interval, 6);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(SchedulerConfig::from_toml_str("max_interval = \"soon\"").is_err());
        assert!(SchedulerConfig::from_toml_str("min_interval = 400").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scheduler.toml");
        std::fs::write(&path, "second_interval = 4\n").unwrap();

        let config = SchedulerConfig::from_file(&path).unwrap();
        assert_eq!(config.second_interval, 4);

        assert!(SchedulerConfig::from_file(dir.path().join("missing.toml")).is_err());
    }
}
