//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    /// Object store connection settings
    #[serde(default)]
    pub store: StoreSettings,

    /// Result rendering settings
    #[serde(default)]
    pub output: OutputSettings,

    /// Diagnostic logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Object store connection settings
///
/// Credentials left unset here may still come from the environment; see
/// `aspect_store::StoreConfig`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreSettings {
    /// Region used for the endpoint host and request signing
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom S3-compatible endpoint, e.g. `http://localhost:9000`
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Access key id
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Secret access key
    #[serde(default)]
    pub secret_access_key: Option<String>,

    /// Session token for temporary credentials
    #[serde(default)]
    pub session_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Address buckets as a path segment instead of a host prefix
    #[serde(default)]
    pub path_style: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            timeout_secs: default_timeout_secs(),
            path_style: false,
        }
    }
}

fn default_region() -> String {
    "ap-northeast-1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Result rendering format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, line-oriented summary
    #[default]
    Human,
    /// Pretty-printed JSON document
    Json,
}

/// Result rendering settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputSettings {
    /// Default output format when `--output` is not given
    #[serde(default)]
    pub format: OutputFormat,

    /// Use ANSI colors in human output
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Diagnostic logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// Default filter directive (overridden by `RUST_LOG`)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
