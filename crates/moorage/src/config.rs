//! Configuration management for moorage.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults. The
//! defaults reproduce the marina's standing rate card and capacity, so an
//! absent config file changes nothing.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::boat::PlaceKind;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "moorage";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `MOORAGE_`)
/// 2. TOML config file at `~/.config/moorage/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registry configuration.
    pub registry: RegistryConfig,
    /// Billing rate configuration.
    pub billing: BillingConfig,
}

/// Registry-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Maximum number of boats the marina holds.
    pub capacity: usize,
}

/// Monthly billing rates, in dollars per foot of boat length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// Rate for a slip in the water.
    pub slip_rate: f64,
    /// Rate for a bay on land.
    pub land_rate: f64,
    /// Rate for a boat on a trailer.
    pub trailor_rate: f64,
    /// Rate for a space in the storage building.
    pub storage_rate: f64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            capacity: crate::registry::DEFAULT_CAPACITY,
        }
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            slip_rate: 12.50,
            land_rate: 14.00,
            trailor_rate: 25.00,
            storage_rate: 11.20,
        }
    }
}

impl BillingConfig {
    /// The monthly per-foot rate for the given place kind.
    ///
    /// Unknown places are never billed.
    #[must_use]
    pub fn rate_for(&self, kind: PlaceKind) -> f64 {
        match kind {
            PlaceKind::Slip => self.slip_rate,
            PlaceKind::Land => self.land_rate,
            PlaceKind::Trailor => self.trailor_rate,
            PlaceKind::Storage => self.storage_rate,
            PlaceKind::Unknown => 0.0,
        }
    }

    fn rates(&self) -> [(&'static str, f64); 4] {
        [
            ("slip_rate", self.slip_rate),
            ("land_rate", self.land_rate),
            ("trailor_rate", self.trailor_rate),
            ("storage_rate", self.storage_rate),
        ]
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `MOORAGE_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("MOORAGE_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.registry.capacity == 0 {
            return Err(Error::ConfigValidation {
                message: "registry capacity must be greater than 0".to_string(),
            });
        }

        for (name, rate) in self.billing.rates() {
            if !rate.is_finite() || rate < 0.0 {
                return Err(Error::ConfigValidation {
                    message: format!("{name} must be a non-negative number, got {rate}"),
                });
            }
        }

        Ok(())
    }
}
