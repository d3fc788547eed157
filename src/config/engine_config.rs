//! Engine Configuration - numerical tunables as TOML values
//!
//! Each section implements `Default` with the values in `defaults`, so a
//! missing file, a missing section or a missing key all behave identically.

use super::defaults;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "WELLPATH_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "wellpath.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration of the trajectory engine.
///
/// Load with `EngineConfig::load()` which searches:
/// 1. `$WELLPATH_CONFIG`
/// 2. `./wellpath.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub min_curvature: MinCurvatureConfig,

    #[serde(default)]
    pub planning: PlanningConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl EngineConfig {
    /// Load configuration using the standard search order. Never fails:
    /// unreadable or invalid files are logged and skipped.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded engine config from {}", CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded engine config from ./{}", LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        info!("No {} found — using built-in defaults", LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Rules:
    /// - thresholds finite and strictly positive
    /// - display budget keeps both endpoints (`max_points >= 2`)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        Self::check_positive(
            self.min_curvature.small_angle_rad,
            "min_curvature.small_angle_rad",
            &mut errors,
        );
        Self::check_positive(
            self.planning.target_epsilon,
            "planning.target_epsilon",
            &mut errors,
        );
        if self.display.max_points < 2 {
            errors.push(format!(
                "display.max_points must be >= 2, got {}",
                self.display.max_points
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_positive(value: f64, name: &str, errors: &mut Vec<String>) {
        if !(value.is_finite() && value > 0.0) {
            errors.push(format!("{name} must be finite and > 0, got {value}"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {1}", .0.display())]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Sections
// ============================================================================

/// Minimum curvature tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinCurvatureConfig {
    /// Dogleg (radians) under which the ratio factor is exactly 1.
    #[serde(default = "default_small_angle_rad")]
    pub small_angle_rad: f64,
}

impl Default for MinCurvatureConfig {
    fn default() -> Self {
        Self {
            small_angle_rad: default_small_angle_rad(),
        }
    }
}

/// Inverse single-segment planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Coincident-point distance for `solve_straight_to_target`.
    #[serde(default = "default_target_epsilon")]
    pub target_epsilon: f64,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            target_epsilon: default_target_epsilon(),
        }
    }
}

/// Output shaping for plotting consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_points: default_max_points(),
        }
    }
}

fn default_small_angle_rad() -> f64 {
    defaults::SMALL_ANGLE_RAD
}

fn default_target_epsilon() -> f64 {
    defaults::TARGET_EPSILON
}

fn default_max_points() -> usize {
    defaults::DEFAULT_MAX_POINTS
}
