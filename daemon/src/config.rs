//! Daemon configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use dao_governance::GovernanceParams;
use dao_types::MemberAddress;
use dao_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a ledger replay run.
///
/// Can be loaded from a TOML file via [`DaoConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoConfig {
    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Members admitted before any operation is replayed, in this order.
    #[serde(default)]
    pub genesis_members: Vec<MemberAddress>,

    /// Admission time (Unix seconds) recorded for genesis members.
    #[serde(default = "default_start_time")]
    pub start_time: u64,

    /// Governance parameters for the ledger. Must stay the last field: it
    /// serializes as a TOML table.
    #[serde(default)]
    pub params: GovernanceParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}

fn default_start_time() -> u64 {
    1
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DaoConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        for (i, addr) in self.genesis_members.iter().enumerate() {
            if self.genesis_members[..i].contains(addr) {
                return Err(ConfigError::Invalid(format!(
                    "genesis member {addr} listed twice"
                )));
            }
        }
        Ok(())
    }
}

impl Default for DaoConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            genesis_members: Vec::new(),
            start_time: default_start_time(),
            params: GovernanceParams::default(),
        }
    }
}
