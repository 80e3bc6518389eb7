use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use crate::models::{ScoringWeights, SearchRadii};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    pub database: Option<DatabaseSettings>,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Which provider store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            seed_sample_data: true,
        }
    }
}

fn default_backend() -> StorageBackend { StorageBackend::Memory }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    #[serde(default)]
    pub enabled: bool,
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_primary_radius")]
    pub primary_radius_km: u16,
    #[serde(default = "default_fallback_radius")]
    pub fallback_radius_km: u16,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            primary_radius_km: default_primary_radius(),
            fallback_radius_km: default_fallback_radius(),
            max_results: default_max_results(),
        }
    }
}

fn default_primary_radius() -> u16 { 30 }
fn default_fallback_radius() -> u16 { 60 }
fn default_max_results() -> usize { 3 }

/// Upper bound on results returned by a single search
pub const MAX_RESULTS_LIMIT: usize = 3;

impl From<&SearchSettings> for SearchRadii {
    fn from(settings: &SearchSettings) -> Self {
        SearchRadii {
            primary_km: settings.primary_radius_km,
            fallback_km: settings.fallback_radius_km,
            max_results: settings.max_results,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_proximity_base")]
    pub proximity_base: f64,
    #[serde(default = "default_rating_weight")]
    pub rating: f64,
    #[serde(default = "default_review_cap")]
    pub review_cap: i32,
    #[serde(default = "default_review_divisor")]
    pub review_divisor: f64,
    #[serde(default = "default_experience_weight")]
    pub experience: f64,
    #[serde(default = "default_category_bonus")]
    pub category_bonus: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            proximity_base: default_proximity_base(),
            rating: default_rating_weight(),
            review_cap: default_review_cap(),
            review_divisor: default_review_divisor(),
            experience: default_experience_weight(),
            category_bonus: default_category_bonus(),
        }
    }
}

fn default_proximity_base() -> f64 { 100.0 }
fn default_rating_weight() -> f64 { 10.0 }
fn default_review_cap() -> i32 { 100 }
fn default_review_divisor() -> f64 { 5.0 }
fn default_experience_weight() -> f64 { 2.0 }
fn default_category_bonus() -> f64 { 30.0 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        ScoringWeights {
            proximity_base: config.proximity_base,
            rating: config.rating,
            review_cap: config.review_cap,
            review_divisor: config.review_divisor,
            experience: config.experience,
            category_bonus: config.category_bonus,
        }
    }
}

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
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with LOCATOR__)
    /// 5. DATABASE_URL, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., LOCATOR__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("LOCATOR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = apply_database_url(settings)?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject search and scoring settings the ranking cannot honor
    ///
    /// Search runs at most two radius tiers and returns at most three
    /// providers, so `0 < primary < fallback` and `1 <= max_results <= 3`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let search = &self.search;

        if search.primary_radius_km == 0 {
            return Err(ConfigError::Message(
                "search.primary_radius_km must be greater than 0".to_string(),
            ));
        }
        if search.fallback_radius_km <= search.primary_radius_km {
            return Err(ConfigError::Message(format!(
                "search.fallback_radius_km ({}) must be greater than search.primary_radius_km ({})",
                search.fallback_radius_km, search.primary_radius_km
            )));
        }
        if !(1..=MAX_RESULTS_LIMIT).contains(&search.max_results) {
            return Err(ConfigError::Message(format!(
                "search.max_results must be between 1 and {}, got {}",
                MAX_RESULTS_LIMIT, search.max_results
            )));
        }

        let weights = &self.scoring.weights;
        if !(weights.review_divisor > 0.0 && weights.review_divisor.is_finite()) {
            return Err(ConfigError::Message(format!(
                "scoring.weights.review_divisor must be a positive number, got {}",
                weights.review_divisor
            )));
        }
        if weights.review_cap < 0 {
            return Err(ConfigError::Message(format!(
                "scoring.weights.review_cap must not be negative, got {}",
                weights.review_cap
            )));
        }
        let finite = [
            ("proximity_base", weights.proximity_base),
            ("rating", weights.rating),
            ("experience", weights.experience),
            ("category_bonus", weights.category_bonus),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Message(format!(
                "scoring.weights.{} must be finite, got {}",
                name, value
            )));
        }

        Ok(())
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }

    pub fn search_radii(&self) -> SearchRadii {
        SearchRadii::from(&self.search)
    }
}

/// Let the conventional DATABASE_URL variable override database.url
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        Err(_) => Ok(settings),
    }
}
