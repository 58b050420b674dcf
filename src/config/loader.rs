//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{defaults, paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root config file
    /// 3. Built-in defaults
    pub fn load() -> Result<Config> {
        Self::load_from(&paths::root_config_path())
    }

    /// Same layering as [`ConfigLoader::load`] with an explicit root file
    pub fn load_from(path: &Path) -> Result<Config> {
        let mut config = Self::load_defaults();

        if path.exists() {
            config = Self::load_file(path)?;
        }

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration by loading it and checking every value parses
    pub fn validate() -> Result<Config> {
        let config = Self::load().context("Failed to load merged configuration")?;
        Self::check(&config)?;
        Ok(config)
    }

    /// Check values that are stored as strings but must parse
    pub fn check(config: &Config) -> Result<()> {
        config.api_url()?;
        config
            .request_timeout()
            .context("requestTimeout is not a valid duration")?;
        config
            .token_cache_ttl()
            .context("tokenCacheTtl is not a valid duration")?;
        config
            .stream_retry()
            .context("stream.retry is not a valid duration")?;
        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(config: Config) -> Config {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
        // OCMDASH_API_URL override
        if let Some(url) = var("OCMDASH_API_URL") {
            config.api_base_url = url;
        }

        // OCMDASH_DEV_MODE override
        if let Some(dev_mode) = var("OCMDASH_DEV_MODE") {
            if let Ok(val) = dev_mode.parse::<bool>() {
                config.dev_mode = val;
            }
        }

        // OCMDASH_TIMEOUT override
        if let Some(timeout) = var("OCMDASH_TIMEOUT") {
            config.request_timeout = timeout;
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}
