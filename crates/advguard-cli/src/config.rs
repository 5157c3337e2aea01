//! `advguard.toml` configuration
//!
//! Every field is optional. Command-line flags take precedence over the file,
//! and a dataset left unset everywhere disables the checks that need it.

use std::path::{Path, PathBuf};

use advguard_core::logging_facility::Profile;
use advguard_engine::options::{DEFAULT_ALIAS_TIMEOUT_SECS, DEFAULT_RECENCY_DAYS};
use anyhow::Context;
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "advguard.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidateConfig {
    pub advisories_dir: Option<PathBuf>,
    pub base_advisories_dir: Option<PathBuf>,
    pub build_configs_dir: Option<PathBuf>,
    pub package_index: Option<PathBuf>,
    pub alias_table: Option<PathBuf>,
    pub packages: Vec<String>,
    pub recency_window_days: i64,
    pub alias_timeout_secs: u64,
    pub log_profile: Profile,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            advisories_dir: None,
            base_advisories_dir: None,
            build_configs_dir: None,
            package_index: None,
            alias_table: None,
            packages: Vec::new(),
            recency_window_days: DEFAULT_RECENCY_DAYS,
            alias_timeout_secs: DEFAULT_ALIAS_TIMEOUT_SECS,
            log_profile: Profile::Development,
        }
    }
}

impl ValidateConfig {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        anyhow::ensure!(
            config.recency_window_days > 0,
            "recency_window_days must be positive, got {}",
            config.recency_window_days
        );
        Ok(config)
    }

    /// Load `explicit` if given, else `advguard.toml` if present, else defaults
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config file {}", path.display()))
    }
}
