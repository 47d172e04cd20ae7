//! YAML schema for a monitor's prefix and schedule

use crate::error::{Error, Result};
use crate::extension::Schedule;
use serde::{Deserialize, Serialize};

/// Prefix and schedule of one monitor
///
/// ```yaml
/// prefix: valid
/// schedule:
///   before_first_epoch: true
///   every_n_epochs: 5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    /// Prefix for record names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Replaces the monitor's default schedule when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
}

impl MonitorConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check the configuration for values no monitor can work with
    pub fn validate(&self) -> Result<()> {
        if let Some(prefix) = &self.prefix {
            if prefix.chars().any(char::is_whitespace) {
                return Err(Error::Config(format!(
                    "prefix '{prefix}' must not contain whitespace"
                )));
            }
        }
        if let Some(schedule) = &self.schedule {
            schedule.validate()?;
        }
        Ok(())
    }
}
