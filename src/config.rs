use chrono::NaiveDate;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::core::{CompatibilityScorer, MatchPolicy, Matcher};
use crate::error::MatchError;
use crate::models::NetworkWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    #[validate(nested)]
    pub scoring: NetworkWeights,
    #[validate(nested)]
    pub matching: MatchingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchingSettings {
    #[serde(default)]
    #[validate(range(max = 100))]
    pub min_score: u8,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default = "default_neutral_score")]
    #[validate(range(max = 100))]
    pub neutral_score: u8,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            min_score: 0,
            limit: None,
            parallel: default_parallel(),
            neutral_score: default_neutral_score(),
        }
    }
}

fn default_parallel() -> bool { true }
fn default_neutral_score() -> u8 { 50 }

#[derive(Debug, Clone, Serialize, Deserialize)]
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
    /// 1. Default values in the struct, key by key
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (`PAWLINK__SECTION__KEY`)
    pub fn load() -> Result<Self, MatchError> {
        let settings = Config::builder()
            .add_source(defaults_source()?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PAWLINK__MATCHING__MIN_SCORE -> matching.min_score
            .add_source(env_source())
            .build()?;

        Self::finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, MatchError> {
        let settings = Config::builder()
            .add_source(defaults_source()?)
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        Self::finish(settings)
    }

    fn finish(settings: Config) -> Result<Self, MatchError> {
        let settings: Settings = settings.try_deserialize()?;
        settings.validate().map_err(MatchError::InvalidSettings)?;
        Ok(settings)
    }

    pub fn policy(&self) -> MatchPolicy {
        MatchPolicy {
            min_score: self.matching.min_score,
            limit: self.matching.limit,
            parallel: self.matching.parallel,
            neutral_score: self.matching.neutral_score,
        }
    }

    /// Build a matcher from these settings, scoring ages as of `as_of`
    pub fn matcher(&self, as_of: NaiveDate) -> Matcher {
        Matcher::new(CompatibilityScorer::new(&self.scoring, as_of), self.policy())
    }
}

/// Defaults as a source, so a partial table only replaces the keys it sets
fn defaults_source() -> Result<Config, MatchError> {
    Ok(Config::try_from(&Settings::default())?)
}

fn env_source() -> Environment {
    Environment::with_prefix("PAWLINK")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
