//! # Configuration Module
//!
//! This module defines the matching thresholds used by the reconciliation
//! workflow and the application settings of the command-line tool.
//!
//! The core functions never read the environment themselves; they take a
//! [`MatchConfig`] argument. [`AppConfig::from_env`] is only used by the
//! binary, after `dotenv` has loaded any `.env` file.

use crate::deduction_errors::{ConfigError, DeductionError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Constants for matching configuration
pub const DEFAULT_MIN_MATCH_SCORE: f64 = 0.45;
pub const DEFAULT_TOKEN_THRESHOLD: f64 = 0.45;
pub const DEFAULT_SERVINGS: u32 = 1;

// Environment variables read by `AppConfig::from_env`
pub const ENV_MIN_MATCH_SCORE: &str = "PANTRY_MIN_MATCH_SCORE";
pub const ENV_TOKEN_THRESHOLD: &str = "PANTRY_TOKEN_THRESHOLD";
pub const ENV_DEFAULT_SERVINGS: &str = "PANTRY_DEFAULT_SERVINGS";
pub const ENV_LOG_FORMAT: &str = "PANTRY_LOG_FORMAT";

/// Fuzzy matching thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Minimum similarity for `find_best_match` to return a record
    pub min_score: f64,
    /// Similarity at which `is_match` accepts names without a shared word
    pub token_threshold: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_MATCH_SCORE,
            token_threshold: DEFAULT_TOKEN_THRESHOLD,
        }
    }
}

impl MatchConfig {
    /// Check that both thresholds lie in `[0, 1]`
    pub fn validate(&self) -> Result<(), DeductionError> {
        check_threshold("min_score", self.min_score)?;
        check_threshold("token_threshold", self.token_threshold)
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), DeductionError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DeductionError::InvalidThreshold { name, value })
    }
}

/// Output format of log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::invalid(
                ENV_LOG_FORMAT,
                s,
                "expected compact or json",
            )),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Settings of the command-line tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Thresholds passed to the reconciliation workflow
    pub matching: MatchConfig,
    /// Servings used when the command line does not give any
    pub default_servings: u32,
    /// Log line format
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            matching: MatchConfig::default(),
            default_servings: DEFAULT_SERVINGS,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    ///
    /// Unset or blank variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = AppConfig::default();

        if let Some(value) = get(ENV_MIN_MATCH_SCORE) {
            config.matching.min_score = parse_threshold(ENV_MIN_MATCH_SCORE, &value)?;
        }
        if let Some(value) = get(ENV_TOKEN_THRESHOLD) {
            config.matching.token_threshold = parse_threshold(ENV_TOKEN_THRESHOLD, &value)?;
        }
        if let Some(value) = get(ENV_DEFAULT_SERVINGS) {
            config.default_servings = match value.trim().parse::<u32>() {
                Ok(servings) if servings >= 1 => servings,
                _ => {
                    return Err(ConfigError::invalid(
                        ENV_DEFAULT_SERVINGS,
                        &value,
                        "expected a whole number of at least 1",
                    ))
                }
            };
        }
        if let Some(value) = get(ENV_LOG_FORMAT) {
            config.log_format = value.parse()?;
        }

        Ok(config)
    }
}

fn parse_threshold(key: &str, value: &str) -> Result<f64, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(threshold) if (0.0..=1.0).contains(&threshold) => Ok(threshold),
        _ => Err(ConfigError::invalid(
            key,
            value,
            "expected a number between 0 and 1",
        )),
    }
}
