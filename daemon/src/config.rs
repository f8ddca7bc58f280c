//! CLI configuration with TOML file support.

use std::path::{Path, PathBuf};

use ballotbox_contract::ContractConfig;
use ballotbox_utils::LogFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the `ballotbox` binary.
///
/// Loaded from a TOML file via [`DaemonConfig::from_toml_file`]; CLI flags and
/// environment variables override individual fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Directory holding the LMDB ledger.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Maximum size of the LMDB memory map in bytes.
    #[serde(default = "default_map_size")]
    pub map_size: usize,

    /// Maximum number of named LMDB databases.
    #[serde(default = "default_max_dbs")]
    pub max_dbs: u32,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Authenticated caller identity used for votes.
    #[serde(default)]
    pub identity: Option<String>,

    /// Contract behaviour.
    #[serde(default)]
    pub contract: ContractConfig,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./ballotbox_data")
}

fn default_map_size() -> usize {
    64 * 1024 * 1024
}

fn default_max_dbs() -> u32 {
    8
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DaemonConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            map_size: default_map_size(),
            max_dbs: default_max_dbs(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            identity: None,
            contract: ContractConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballotbox_contract::InitiatePolicy;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = DaemonConfig::default();
        let toml_str = config.to_toml_string().expect("serializable");
        let parsed = DaemonConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.map_size, config.map_size);
        assert_eq!(parsed.contract, config.contract);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = DaemonConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.max_dbs, 8);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.log_level, "warn");
        assert!(config.identity.is_none());
        assert_eq!(config.contract.initiate_policy, InitiatePolicy::Reject);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            data_dir = "/var/lib/ballotbox"
            log_format = "json"
            identity = "x509::CN=alice"

            [contract]
            initiate_policy = "overwrite"
        "#;
        let config = DaemonConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/ballotbox"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.identity.as_deref(), Some("x509::CN=alice"));
        assert_eq!(config.contract.initiate_policy, InitiatePolicy::Overwrite);
        assert_eq!(config.contract.option_delimiter, ','); // default
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let toml = r#"
            [contract]
            initiate_policy = "merge"
        "#;
        assert!(matches!(
            DaemonConfig::from_toml_str(toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.toml");
        let err = DaemonConfig::from_toml_file(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}
