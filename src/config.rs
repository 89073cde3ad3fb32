use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ActivityError, ActivityResult};
use crate::DecayingCounter;

/// Default characteristic time (seconds).
pub const DEFAULT_CHARACTERISTIC_TIME_SECS: f64 = 60.0;

/// Counter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Exponential decay time constant (seconds). Pick something longer than the expected
    /// interval between events and short enough to follow changes in the stream.
    pub characteristic_time_secs: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            characteristic_time_secs: DEFAULT_CHARACTERISTIC_TIME_SECS,
        }
    }
}

impl CounterConfig {
    /// Parse a configuration from a TOML document. Missing keys take their defaults.
    pub fn from_toml(source: &str) -> ActivityResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ActivityError::InvalidConfig {
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ActivityResult<()> {
        let secs = self.characteristic_time_secs;

        if !secs.is_finite() || secs <= 0.0 {
            return Err(ActivityError::InvalidConfig {
                reason: format!("characteristic_time_secs must be finite and positive, given {secs}"),
            });
        }

        Duration::try_from_secs_f64(secs).map_err(|e| ActivityError::InvalidConfig {
            reason: e.to_string(),
        })?;

        Ok(())
    }

    pub fn characteristic_time(&self) -> ActivityResult<Duration> {
        self.validate()?;
        Duration::try_from_secs_f64(self.characteristic_time_secs).map_err(|e| {
            ActivityError::InvalidConfig {
                reason: e.to_string(),
            }
        })
    }

    /// Builds a fresh counter from this configuration.
    pub fn build(&self) -> ActivityResult<DecayingCounter> {
        DecayingCounter::try_new(self.characteristic_time()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CounterConfig::from_toml("").unwrap();

        assert_eq!(config, CounterConfig::default());
        assert_eq!(config.characteristic_time().unwrap(), Duration::from_secs(60));
    }

    #[test]
    fn parse() {
        let config = CounterConfig::from_toml("characteristic_time_secs = 0.5").unwrap();
        let counter = config.build().unwrap();

        assert_eq!(counter.characteristic_time(), Duration::from_millis(500));
        assert_eq!(counter.value(), 0.0);
        assert_eq!(counter.last_update(), None);
    }

    #[test]
    fn rejects_non_positive() {
        assert!(matches!(
            CounterConfig::from_toml("characteristic_time_secs = 0.0"),
            Err(ActivityError::InvalidConfig { .. })
        ));
        assert!(matches!(
            CounterConfig::from_toml("characteristic_time_secs = -3.0"),
            Err(ActivityError::InvalidConfig { .. })
        ));
        assert!(CounterConfig { characteristic_time_secs: f64::NAN }.build().is_err());
    }

    #[test]
    fn rejects_malformed() {
        assert!(matches!(
            CounterConfig::from_toml("characteristic_time_secs = \"soon\""),
            Err(ActivityError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn round_trip_through_toml() {
        let config = CounterConfig { characteristic_time_secs: 3600.0 };
        let source = toml::to_string(&config).unwrap();

        assert_eq!(CounterConfig::from_toml(&source).unwrap(), config);
    }
}
