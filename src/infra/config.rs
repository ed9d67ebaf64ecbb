//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/dev.toml

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Deployment identifier used in logs
    #[serde(default = "default_site_id")]
    pub id: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { id: default_site_id() }
    }
}

fn default_site_id() -> String {
    "tourtrack".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewardsConfig {
    /// Distance under which a visit earns an attraction's reward (statute miles)
    #[serde(default = "default_proximity_miles")]
    pub proximity_miles: f64,
    /// Distance under which a coordinate counts as within an attraction (statute miles)
    #[serde(default = "default_attraction_range_miles")]
    pub attraction_range_miles: f64,
    /// Concurrent reward-lookup workers per engine
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Timeout for one reward point lookup (milliseconds)
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            proximity_miles: default_proximity_miles(),
            attraction_range_miles: default_attraction_range_miles(),
            workers: default_workers(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
        }
    }
}

fn default_proximity_miles() -> f64 {
    10.0
}

fn default_attraction_range_miles() -> f64 {
    // Sentinel wide enough to cover the whole catalog
    1_000_000.0
}

fn default_workers() -> usize {
    10
}

fn default_lookup_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackingConfig {
    /// Seconds between periodic tracking sweeps
    #[serde(default = "default_tracking_interval_secs")]
    pub interval_secs: u64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self { interval_secs: default_tracking_interval_secs() }
    }
}

fn default_tracking_interval_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// API key passed through to the trip pricing service
    #[serde(default = "default_pricing_api_key")]
    pub api_key: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self { api_key: default_pricing_api_key() }
    }
}

fn default_pricing_api_key() -> String {
    "test-server-api-key".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_interval_secs")]
    pub interval_secs: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { interval_secs: default_metrics_interval_secs() }
    }
}

fn default_metrics_interval_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersConfig {
    /// Number of synthetic users seeded into the in-memory repository
    #[serde(default = "default_internal_user_count")]
    pub internal_count: usize,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self { internal_count: default_internal_user_count() }
    }
}

fn default_internal_user_count() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub users: UsersConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    site_id: String,
    proximity_miles: f64,
    attraction_range_miles: f64,
    reward_workers: usize,
    lookup_timeout_ms: u64,
    tracking_interval_secs: u64,
    pricing_api_key: String,
    metrics_interval_secs: u64,
    internal_user_count: usize,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_id: default_site_id(),
            proximity_miles: default_proximity_miles(),
            attraction_range_miles: default_attraction_range_miles(),
            reward_workers: default_workers(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
            tracking_interval_secs: default_tracking_interval_secs(),
            pricing_api_key: default_pricing_api_key(),
            metrics_interval_secs: default_metrics_interval_secs(),
            internal_user_count: default_internal_user_count(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Determine config file path from args or environment
    pub fn resolve_config_path(args: &[String]) -> String {
        // Check for --config argument
        for (i, arg) in args.iter().enumerate() {
            if arg == "--config" {
                if let Some(path) = args.get(i + 1) {
                    return path.clone();
                }
            }
            if let Some(path) = arg.strip_prefix("--config=") {
                return path.to_string();
            }
        }

        // Check CONFIG_FILE environment variable
        if let Ok(path) = env::var("CONFIG_FILE") {
            return path;
        }

        // Default to dev.toml
        "config/dev.toml".to_string()
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self {
            site_id: toml_config.site.id,
            proximity_miles: toml_config.rewards.proximity_miles,
            attraction_range_miles: toml_config.rewards.attraction_range_miles,
            reward_workers: toml_config.rewards.workers,
            lookup_timeout_ms: toml_config.rewards.lookup_timeout_ms,
            tracking_interval_secs: toml_config.tracking.interval_secs,
            pricing_api_key: toml_config.pricing.api_key,
            metrics_interval_secs: toml_config.metrics.interval_secs,
            internal_user_count: toml_config.users.internal_count,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries TOML file first, falls back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    // Getters for all config fields
    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn proximity_miles(&self) -> f64 {
        self.proximity_miles
    }

    pub fn attraction_range_miles(&self) -> f64 {
        self.attraction_range_miles
    }

    pub fn reward_workers(&self) -> usize {
        self.reward_workers
    }

    pub fn lookup_timeout_ms(&self) -> u64 {
        self.lookup_timeout_ms
    }

    pub fn tracking_interval_secs(&self) -> u64 {
        self.tracking_interval_secs
    }

    pub fn pricing_api_key(&self) -> &str {
        &self.pricing_api_key
    }

    pub fn metrics_interval_secs(&self) -> u64 {
        self.metrics_interval_secs
    }

    pub fn internal_user_count(&self) -> usize {
        self.internal_user_count
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method for tests to set the reward proximity
    #[cfg(test)]
    pub fn with_proximity_miles(mut self, miles: f64) -> Self {
        self.proximity_miles = miles;
        self
    }

    /// Builder method for tests to set the worker count
    #[cfg(test)]
    pub fn with_reward_workers(mut self, workers: usize) -> Self {
        self.reward_workers = workers;
        self
    }

    /// Builder method for tests to set the lookup timeout
    #[cfg(test)]
    pub fn with_lookup_timeout_ms(mut self, ms: u64) -> Self {
        self.lookup_timeout_ms = ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.site_id(), "tourtrack");
        assert_eq!(config.proximity_miles(), 10.0);
        assert_eq!(config.attraction_range_miles(), 1_000_000.0);
        assert_eq!(config.reward_workers(), 10);
        assert_eq!(config.lookup_timeout_ms(), 10_000);
        assert_eq!(config.tracking_interval_secs(), 300);
        assert_eq!(config.pricing_api_key(), "test-server-api-key");
        assert_eq!(config.internal_user_count(), 100);
    }

    #[test]
    fn test_resolve_config_path_default() {
        let args: Vec<String> = vec!["tourtrack".to_string()];
        assert_eq!(Config::resolve_config_path(&args), "config/dev.toml");
    }

    #[test]
    fn test_resolve_config_path_from_arg() {
        let args: Vec<String> = vec![
            "tourtrack".to_string(),
            "--config".to_string(),
            "config/prod.toml".to_string(),
        ];
        assert_eq!(Config::resolve_config_path(&args), "config/prod.toml");
    }

    #[test]
    fn test_resolve_config_path_from_arg_equals() {
        let args: Vec<String> =
            vec!["tourtrack".to_string(), "--config=config/staging.toml".to_string()];
        assert_eq!(Config::resolve_config_path(&args), "config/staging.toml");
    }

    #[test]
    fn test_load_from_missing_file_falls_back() {
        let config = Config::load_from_path("does/not/exist.toml");
        assert_eq!(config.proximity_miles(), 10.0);
        assert_eq!(config.config_file(), "default");
    }
}
