//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pagination::ContinuationParams;

/// Default per-request timeout, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Errors that can occur when loading or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("failed to parse JSON config: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("failed to serialize config to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Where the node lives and how queries against it behave.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root of the REST state-query endpoint, e.g. `https://lcd.example.org`.
    pub rest_url: String,

    /// Root of the node RPC endpoint, e.g. `https://rpc.example.org`.
    pub rpc_url: String,

    /// Denomination used by supply queries that name none.
    pub default_denom: String,

    /// Timeout applied to each individual HTTP request, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Give up on a paginated query after this many pages. Unlimited when unset.
    #[serde(default)]
    pub max_pages: Option<usize>,

    /// Overall deadline for one paginated query, across all its pages, in milliseconds.
    #[serde(default)]
    pub deadline_ms: Option<u64>,

    /// Which parameters follow-up page requests carry.
    #[serde(default)]
    pub continuation: ContinuationParams,
}

impl ClientConfig {
    pub fn new(
        rest_url: impl Into<String>,
        rpc_url: impl Into<String>,
        default_denom: impl Into<String>,
    ) -> Self {
        Self {
            rest_url: rest_url.into(),
            rpc_url: rpc_url.into(),
            default_denom: default_denom.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_pages: None,
            deadline_ms: None,
            continuation: ContinuationParams::default(),
        }
    }

    /// Local single-node defaults: REST on 1317, RPC on 26657.
    pub fn local(default_denom: impl Into<String>) -> Self {
        Self::new("http://localhost:1317", "http://localhost:26657", default_denom)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = millis(timeout);
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline_ms = Some(millis(deadline));
        self
    }

    pub fn with_continuation(mut self, continuation: ContinuationParams) -> Self {
        self.continuation = continuation;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    /// Load configuration from a file path, auto-detecting format by extension.
    ///
    /// `.json` files are parsed as JSON, everything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml(&read(path)?)
    }

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json(&read(path)?)
    }

    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.into(),
        source,
    })
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let config = ClientConfig::new("http://lcd", "http://rpc", "uhuahua");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.max_pages, None);
        assert_eq!(config.deadline(), None);
        assert_eq!(config.continuation, ContinuationParams::CursorOnly);
    }

    #[test]
    fn minimal_toml_fills_defaults() {
        let config = ClientConfig::from_toml(
            r#"
            rest_url = "https://lcd.example.org"
            rpc_url = "https://rpc.example.org"
            default_denom = "uatom"
            "#,
        )
        .unwrap();
        assert_eq!(config, ClientConfig::new("https://lcd.example.org", "https://rpc.example.org", "uatom"));
    }

    #[test]
    fn toml_overrides() {
        let config = ClientConfig::from_toml(
            r#"
            rest_url = "https://lcd.example.org"
            rpc_url = "https://rpc.example.org"
            default_denom = "uatom"
            timeout_ms = 5000
            max_pages = 100
            deadline_ms = 300000
            continuation = "resend_filters"
            "#,
        )
        .unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.max_pages, Some(100));
        assert_eq!(config.deadline(), Some(Duration::from_secs(300)));
        assert_eq!(config.continuation, ContinuationParams::ResendFilters);
    }

    #[test]
    fn sub_second_durations_keep_millisecond_precision() {
        let config = ClientConfig::new("http://lcd", "http://rpc", "uhuahua")
            .with_timeout(Duration::from_millis(500))
            .with_deadline(Duration::from_millis(1500));
        assert_eq!(config.timeout(), Duration::from_millis(500));
        assert_eq!(config.deadline(), Some(Duration::from_millis(1500)));
        assert_eq!(config.timeout_ms, 500);
        assert_eq!(config.deadline_ms, Some(1500));
    }

    #[test]
    fn missing_required_field_errors() {
        let err = ClientConfig::from_toml(r#"rest_url = "http://lcd""#).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ClientConfig::local("uhuahua").with_max_pages(10);
        let parsed = ClientConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ClientConfig::local("uhuahua").with_deadline(Duration::from_secs(30));
        let parsed = ClientConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("client.toml");
        let expected = ClientConfig::local("uatom");
        std::fs::write(&toml_path, expected.to_toml().unwrap()).unwrap();
        assert_eq!(ClientConfig::load(&toml_path).unwrap(), expected);

        let json_path = dir.path().join("client.json");
        let expected = ClientConfig::local("ujuno");
        std::fs::write(&json_path, expected.to_json().unwrap()).unwrap();
        assert_eq!(ClientConfig::load(&json_path).unwrap(), expected);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nonexistent.toml");
        assert!(matches!(
            ClientConfig::load(&path),
            Err(ConfigError::Read { .. })
        ));
    }
}
