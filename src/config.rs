use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub mealdb: MealDbSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub sessions: SessionSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct MealDbSettings {
    #[serde(default = "default_mealdb_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MealDbSettings {
    fn default() -> Self {
        Self {
            base_url: default_mealdb_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl MealDbSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_mealdb_url() -> String { "https://www.themealdb.com/api/json/v1/1".to_string() }
fn default_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Redis L2 cache; in-process only when unset
    pub redis_url: Option<String>,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_l1_cache_size")]
    pub l1_cache_size: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            redis_url: None,
            ttl_secs: default_ttl_secs(),
            l1_cache_size: default_l1_cache_size(),
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

// 30 minutes
fn default_ttl_secs() -> u64 { 1800 }
fn default_l1_cache_size() -> u64 { 1000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// JSON catalog replacing the embedded one
    pub path: Option<String>,
}

/// Bounds for the per-profile "latest recommendation" store
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_max_profiles")]
    pub max_profiles: u64,
    #[serde(default = "default_idle_secs")]
    pub idle_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_profiles: default_max_profiles(),
            idle_secs: default_idle_secs(),
        }
    }
}

impl SessionSettings {
    pub fn idle(&self) -> Duration {
        Duration::from_secs(self.idle_secs)
    }
}

fn default_max_profiles() -> u64 { 10_000 }
// 1 hour
fn default_idle_secs() -> u64 { 3600 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_base_score")]
    pub base: f64,
    #[serde(default = "default_health_weight")]
    pub health_match: f64,
    #[serde(default = "default_dietary_weight")]
    pub dietary_match: f64,
    #[serde(default = "default_religious_weight")]
    pub religious_match: f64,
    #[serde(default = "default_culture_bonus")]
    pub culture_bonus: f64,
    #[serde(default = "default_unaddressed_penalty")]
    pub unaddressed_penalty: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            base: default_base_score(),
            health_match: default_health_weight(),
            dietary_match: default_dietary_weight(),
            religious_match: default_religious_weight(),
            culture_bonus: default_culture_bonus(),
            unaddressed_penalty: default_unaddressed_penalty(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            base: config.base,
            health_match: config.health_match,
            dietary_match: config.dietary_match,
            religious_match: config.religious_match,
            culture_bonus: config.culture_bonus,
            unaddressed_penalty: config.unaddressed_penalty,
        }
    }
}

fn default_base_score() -> f64 { 5.0 }
fn default_health_weight() -> f64 { 2.0 }
fn default_dietary_weight() -> f64 { 1.5 }
fn default_religious_weight() -> f64 { 2.0 }
fn default_culture_bonus() -> f64 { 1.5 }
fn default_unaddressed_penalty() -> f64 { 0.5 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CULTUREBITE__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CULTUREBITE__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        let settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CULTUREBITE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply the conventional unprefixed variables used by deployments
///
/// `MEALDB_API_URL` sets `mealdb.base_url`, `REDIS_URL` sets `cache.redis_url`.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("MEALDB_API_URL") {
        builder = builder.set_override("mealdb.base_url", url)?;
    }
    if let Ok(url) = env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", url)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::from(&WeightsConfig::default());
        assert_eq!(weights, ScoringWeights::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings: Settings = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.mealdb.base_url, "https://www.themealdb.com/api/json/v1/1");
        assert_eq!(settings.cache.ttl(), Duration::from_secs(30 * 60));
        assert!(settings.cache.redis_url.is_none());
        assert!(settings.catalog.path.is_none());
        assert_eq!(settings.sessions.max_profiles, 10_000);
        assert_eq!(settings.sessions.idle(), Duration::from_secs(3600));
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, "json");
    }

    #[test]
    fn test_partial_weights_override() {
        let settings: Settings = Config::builder()
            .set_override("scoring.weights.culture_bonus", 3.0)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let weights = settings.scoring_weights();
        assert_eq!(weights.culture_bonus, 3.0);
        assert_eq!(weights.base, 5.0);
    }
}
