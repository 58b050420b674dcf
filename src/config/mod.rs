//! Configuration for the dashboard client
//!
//! Layers built-in defaults, the root YAML file and `OCMDASH_*` environment
//! overrides. Keys use the same camelCase names as the file.

mod defaults;
pub mod duration;
pub mod loader;
pub mod paths;
pub mod schema;

pub use duration::parse_duration;
pub use loader::ConfigLoader;
pub use schema::{Config, OutputFormat, StreamConfig};

use anyhow::Context;

/// Keys accepted by `config get` / `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "apiBaseUrl",
    "devMode",
    "requestTimeout",
    "tokenCacheTtl",
    "stream.retry",
    "output",
];

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "apiBaseUrl" => Ok(config.api_base_url.clone()),
        "devMode" => Ok(config.dev_mode.to_string()),
        "requestTimeout" => Ok(config.request_timeout.clone()),
        "tokenCacheTtl" => Ok(config.token_cache_ttl.clone()),
        "stream.retry" => Ok(config.stream.retry.clone()),
        "output" => Ok(config.output.as_str().to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "apiBaseUrl" => {
            url::Url::parse(value).context("apiBaseUrl must be an absolute URL")?;
            config.api_base_url = value.to_string();
        }
        "devMode" => {
            config.dev_mode = value
                .parse()
                .context("devMode must be 'true' or 'false'")?;
        }
        "requestTimeout" => {
            parse_duration(value).context("requestTimeout must be a duration like 30s")?;
            config.request_timeout = value.to_string();
        }
        "tokenCacheTtl" => {
            parse_duration(value).context("tokenCacheTtl must be a duration like 5m")?;
            config.token_cache_ttl = value.to_string();
        }
        "stream.retry" => {
            parse_duration(value).context("stream.retry must be a duration like 3s")?;
            config.stream.retry = value.to_string();
        }
        "output" => {
            config.output = value.parse()?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}
