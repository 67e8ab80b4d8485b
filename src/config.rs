//! Acquisition configuration.
//!
//! Which variables, ensemble members and lead times to pull from the CPC
//! archive, and where to cache them. Everything the download layer varies
//! over lives here explicitly; the built-in defaults match the CFSv2
//! monthly products for Europe.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One forecast variable: the directory name groups are filed under and
/// the code used in archive URLs.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct VariableSpec {
    /// Directory name, e.g. `Europe_T2m`
    pub name: String,
    /// URL code, e.g. `euT2m`
    pub code: String,
}

/// Configuration for the CFSv2 acquisition layer.
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Base URL of the current-cycle image archive
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base URL of the forecast-history archive
    #[serde(default = "default_history_url")]
    pub history_url: String,

    /// Variables to download, in download order
    #[serde(default = "default_variables")]
    pub variables: Vec<VariableSpec>,

    /// Ensemble member identifiers as they appear in archive URLs
    #[serde(default = "default_ensemble")]
    pub ensemble: Vec<String>,

    /// Highest lead time in months (leads run 1..=max_lead)
    #[serde(default = "default_max_lead")]
    pub max_lead: u32,

    /// How many past generation months of history to pull
    #[serde(default = "default_history_months")]
    pub history_months: u32,

    /// Local cache directory for downloaded maps
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

fn default_base_url() -> String {
    "https://www.cpc.ncep.noaa.gov/products/CFSv2/".to_string()
}

fn default_history_url() -> String {
    "https://www.cpc.ncep.noaa.gov/products/CFSv2/cfsv2_fcst_history/".to_string()
}

fn default_variables() -> Vec<VariableSpec> {
    vec![
        VariableSpec {
            name: "Europe_T2m".to_string(),
            code: "euT2m".to_string(),
        },
        VariableSpec {
            name: "Europe_Prec".to_string(),
            code: "euPrec".to_string(),
        },
    ]
}

fn default_ensemble() -> Vec<String> {
    vec!["1".to_string(), "2".to_string(), "3".to_string()]
}

fn default_max_lead() -> u32 {
    6
}

fn default_history_months() -> u32 {
    6
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".noaa")
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            history_url: default_history_url(),
            variables: default_variables(),
            ensemble: default_ensemble(),
            max_lead: default_max_lead(),
            history_months: default_history_months(),
            cache_dir: default_cache_dir(),
        }
    }
}

/// Error loading a [`FetchConfig`] from a YAML file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl FetchConfig {
    /// Load configuration from a YAML file. Missing fields fall back to
    /// the built-in defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            variables = config.variables.len(),
            members = config.ensemble.len(),
            "Loaded acquisition config"
        );
        Ok(config)
    }
}
