//! Service configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use witness_types::WitnessingParams;
use witness_utils::LogFormat;

use crate::ServiceError;

/// Configuration for the witnessing service.
///
/// Can be loaded from a TOML file via [`ServiceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Data directory for the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// LMDB map size in bytes.
    #[serde(default = "default_lmdb_map_size")]
    pub lmdb_map_size: usize,

    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP port.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Webhook that receives notifications. Notifications are only logged
    /// when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,

    /// Code expiry, input length and attempt limiting.
    #[serde(default)]
    pub witnessing: WitnessingParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./witness_data")
}

fn default_lmdb_map_size() -> usize {
    256 * 1024 * 1024
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    7080
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ServiceError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ServiceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ServiceError> {
        let config: Self = toml::from_str(s).map_err(|e| ServiceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ServiceError> {
        toml::to_string_pretty(self).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// Reject settings under which no code could ever be accepted.
    pub fn validate(&self) -> Result<(), ServiceError> {
        let w = &self.witnessing;
        if w.code_length == 0 {
            return Err(ServiceError::Config("witnessing.code_length must be > 0".into()));
        }
        if w.code_ttl_secs == 0 {
            return Err(ServiceError::Config("witnessing.code_ttl_secs must be > 0".into()));
        }
        if w.limiter_window_secs == 0 {
            return Err(ServiceError::Config(
                "witnessing.limiter_window_secs must be > 0".into(),
            ));
        }
        if w.limiter_capacity == 0 || w.limiter_refill == 0 {
            return Err(ServiceError::Config(
                "witnessing.limiter_capacity and limiter_refill must be > 0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            lmdb_map_size: default_lmdb_map_size(),
            bind_address: default_bind_address(),
            http_port: default_http_port(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            notify_url: None,
            witnessing: WitnessingParams::default(),
        }
    }
}
