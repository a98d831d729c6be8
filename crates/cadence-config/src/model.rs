use cadence_domain::IntervalKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ConfigError;

pub const TRANSACTIONS_FILE: &str = "transactions.json";
pub const MIN_HORIZON_YEARS: u32 = 1;
pub const MAX_HORIZON_YEARS: u32 = 50;

/// Tunables for the recurrence engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// How far past the reference date occurrences are produced.
    #[serde(default = "EngineConfig::default_horizon_years")]
    pub horizon_years: u32,
    #[serde(default)]
    pub default_interval: IntervalKind,
    /// `tracing` filter directives used by `cadence::init_with_config`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for transaction data. Defaults to the directory
    /// the configuration was loaded from.
    pub data_root: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            horizon_years: Self::default_horizon_years(),
            default_interval: IntervalKind::default(),
            log_filter: None,
            data_root: None,
        }
    }
}

impl EngineConfig {
    pub fn default_horizon_years() -> u32 {
        5
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_HORIZON_YEARS..=MAX_HORIZON_YEARS).contains(&self.horizon_years) {
            return Err(ConfigError::Invalid(format!(
                "horizon_years must be between {} and {}, got {}",
                MIN_HORIZON_YEARS, MAX_HORIZON_YEARS, self.horizon_years
            )));
        }
        if let Some(filter) = &self.log_filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::Invalid("log_filter must not be blank".into()));
            }
        }
        Ok(())
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Cadence")
    }

    /// Location of the transaction document: the configured data root, else `base`.
    pub fn transactions_path_in(&self, base: &Path) -> PathBuf {
        self.data_root
            .as_deref()
            .unwrap_or(base)
            .join(TRANSACTIONS_FILE)
    }
}
