//! Session configuration.
//!
//! Loaded from JSON or defaults. `BRIGADE_SPEED` and `BRIGADE_SEED` override the file.

use brigade_framework::Seconds;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const SPEED_ENV: &str = "BRIGADE_SPEED";
pub const SEED_ENV: &str = "BRIGADE_SEED";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Environment variable {var} has unusable value '{value}'")]
    Env { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub table_count: u32,
    /// Seats per table; parties larger than this are rejected.
    pub table_capacity: u32,
    pub min_courses: u32,
    pub max_courses: u32,
    pub max_dishes_per_ticket: u32,
    /// Eating time per course before the next one unlocks.
    pub consumption_seconds: Seconds,
    pub initial_speed: f64,
    /// Real-time interval between driver steps.
    pub step_interval_ms: u64,
    pub seed: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            table_count: 4,
            table_capacity: 6,
            min_courses: 1,
            max_courses: 3,
            max_dishes_per_ticket: 6,
            consumption_seconds: 20.0,
            initial_speed: 1.0,
            step_interval_ms: 100,
            seed: 7,
        }
    }
}

impl ServiceConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Applies `BRIGADE_SPEED` / `BRIGADE_SEED` when set.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Same as [`with_env_overrides`](Self::with_env_overrides) with an injectable lookup.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(SPEED_ENV) {
            self.initial_speed = value.trim().parse().map_err(|_| ConfigError::Env {
                var: SPEED_ENV,
                value: value.clone(),
            })?;
            info!(speed = self.initial_speed, "Speed overridden from environment");
        }
        if let Some(value) = lookup(SEED_ENV) {
            self.seed = value.trim().parse().map_err(|_| ConfigError::Env {
                var: SEED_ENV,
                value: value.clone(),
            })?;
            info!(seed = self.seed, "Seed overridden from environment");
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_count == 0 {
            return Err(ConfigError::Invalid("table_count must be at least 1".into()));
        }
        if self.min_courses == 0 || self.min_courses > self.max_courses {
            return Err(ConfigError::Invalid(format!(
                "course range {}..={} is empty or starts at 0",
                self.min_courses, self.max_courses
            )));
        }
        if self.max_dishes_per_ticket < self.max_courses {
            return Err(ConfigError::Invalid(format!(
                "max_dishes_per_ticket ({}) is below max_courses ({})",
                self.max_dishes_per_ticket, self.max_courses
            )));
        }
        if !self.consumption_seconds.is_finite() || self.consumption_seconds < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "consumption_seconds must be non-negative, got {}",
                self.consumption_seconds
            )));
        }
        if !self.initial_speed.is_finite() || self.initial_speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "initial_speed must be positive, got {}",
                self.initial_speed
            )));
        }
        if self.step_interval_ms == 0 {
            return Err(ConfigError::Invalid("step_interval_ms must be positive".into()));
        }
        Ok(())
    }
}
