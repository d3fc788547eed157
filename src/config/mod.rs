//! Engine Configuration Module
//!
//! Numerical tunables of the trajectory engine, loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `WELLPATH_CONFIG` environment variable (path to TOML file)
//! 2. `wellpath.toml` in the current working directory
//! 3. Built-in defaults (see `defaults`)
//!
//! ## Usage
//!
//! The library never requires a config: tunables fall back to `defaults`
//! until `config::init()` is called.
//!
//! ```ignore
//! // In main():
//! config::init(EngineConfig::load());
//!
//! // Anywhere in the codebase:
//! let threshold = config::get().min_curvature.small_angle_rad;
//! ```

mod engine_config;
pub mod defaults;

pub use engine_config::*;

use std::sync::OnceLock;

/// Global engine configuration, initialized once at startup.
static ENGINE_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Initialize the global engine configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: EngineConfig) {
    if ENGINE_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once — ignoring");
    }
}

/// Get a reference to the global engine configuration.
///
/// Panics if `init()` has not been called. Library code checks
/// `is_initialized()` first and falls back to `defaults`.
pub fn get() -> &'static EngineConfig {
    ENGINE_CONFIG
        .get()
        .expect("config::get() called before config::init() — this is a startup bug")
}

/// Check whether the config has been initialized.
pub fn is_initialized() -> bool {
    ENGINE_CONFIG.get().is_some()
}
