use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    domain::{Period, DANGER_THRESHOLD, WARNING_THRESHOLD},
    errors::BudgetError,
};

/// Persistent user preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency_symbol: String,
    /// Period selected when no budget record exists yet.
    pub default_period: Period,
    /// Usage percentage at which alerts start.
    pub alert_warning: f64,
    pub alert_danger: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-IN".into(),
            currency_symbol: "₹".into(),
            default_period: Period::Monthly,
            alert_warning: WARNING_THRESHOLD,
            alert_danger: DANGER_THRESHOLD,
        }
    }
}

impl Config {
    /// Alert bands must be finite, with `alert_warning <= alert_danger`.
    pub fn validate(&self) -> Result<(), BudgetError> {
        if !self.alert_warning.is_finite() || !self.alert_danger.is_finite() {
            return Err(BudgetError::Config(
                "alert thresholds must be finite numbers".into(),
            ));
        }
        if self.alert_warning > self.alert_danger {
            return Err(BudgetError::Config(format!(
                "alert_warning ({}) must not exceed alert_danger ({})",
                self.alert_warning, self.alert_danger
            )));
        }
        Ok(())
    }
}

/// Reads and writes [`Config`] under the application base directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self, BudgetError> {
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Stored preferences, or the defaults when no file exists yet.
    pub fn load(&self) -> Result<Config, BudgetError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| BudgetError::Config(format!("{}: {err}", self.path.display())))?;
        config.validate().map_err(|err| match err {
            BudgetError::Config(message) => {
                BudgetError::Config(format!("{}: {message}", self.path.display()))
            }
            other => other,
        })?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), BudgetError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
