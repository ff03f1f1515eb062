//! Well Plan Configuration Module
//!
//! Provides the plan file: profile, parameter record, rendering and report
//! settings loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `WELLPATH_CONFIG` environment variable (path to TOML file)
//! 2. `well_plan.toml` in the current working directory
//! 3. Built-in defaults (no parameters set)
//!
//! ## Usage
//!
//! The CLI calls `config::init()` once at startup, then `config::get()`
//! wherever it needs render or report settings. The solvers never read the
//! global; they take a `WellParameters` argument.
//!
//! ```ignore
//! config::init(PlanConfig::load());
//! let steps = config::get().render.samples_per_arc;
//! ```

mod plan_config;
pub mod defaults;
pub mod validation;

pub use plan_config::*;

use std::sync::OnceLock;

/// Global plan configuration, initialized once at startup.
static PLAN_CONFIG: OnceLock<PlanConfig> = OnceLock::new();

/// Initialize the global plan configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: PlanConfig) {
    if PLAN_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global plan configuration.
///
/// Falls back to built-in defaults when `init()` was never called.
pub fn get() -> &'static PlanConfig {
    PLAN_CONFIG.get_or_init(PlanConfig::default)
}

/// Check whether the config has been initialized.
pub fn is_initialized() -> bool {
    PLAN_CONFIG.get().is_some()
}
