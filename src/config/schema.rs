//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use super::duration::parse_duration;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Dashboard backend base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Development mode: the cluster stream stays closed
    #[serde(default = "default_false")]
    pub dev_mode: bool,

    /// Per-request timeout ("30s", "500ms", "2m")
    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,

    /// Lifetime of a cached OIDC ID token
    #[serde(default = "default_token_cache_ttl")]
    pub token_cache_ttl: String,

    /// Cluster stream configuration
    #[serde(default)]
    pub stream: StreamConfig,

    /// Default output format for resource commands
    #[serde(default)]
    pub output: OutputFormat,
}

/// Cluster stream configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreamConfig {
    /// Reconnect delay used until the server sends a `retry:` field
    #[serde(default = "default_stream_retry")]
    pub retry: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "yaml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow::anyhow!("output must be one of table, yaml, json")),
        }
    }
}

// Default value functions
fn default_api_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_false() -> bool {
    false
}

fn default_request_timeout() -> String {
    "30s".to_string()
}

fn default_token_cache_ttl() -> String {
    "5m".to_string()
}

fn default_stream_retry() -> String {
    "3s".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            dev_mode: default_false(),
            request_timeout: default_request_timeout(),
            token_cache_ttl: default_token_cache_ttl(),
            stream: StreamConfig::default(),
            output: OutputFormat::default(),
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            retry: default_stream_retry(),
        }
    }
}

impl Config {
    /// Parsed `apiBaseUrl`
    pub fn api_url(&self) -> anyhow::Result<url::Url> {
        url::Url::parse(&self.api_base_url).map_err(|e| {
            anyhow::anyhow!(
                "apiBaseUrl '{}' is not a valid URL: {}",
                self.api_base_url,
                e
            )
        })
    }

    pub fn request_timeout(&self) -> anyhow::Result<Duration> {
        parse_duration(&self.request_timeout)
    }

    pub fn token_cache_ttl(&self) -> anyhow::Result<Duration> {
        parse_duration(&self.token_cache_ttl)
    }

    pub fn stream_retry(&self) -> anyhow::Result<Duration> {
        parse_duration(&self.stream.retry)
    }
}
