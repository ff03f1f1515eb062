//! Well Plan Configuration - profile, parameters and output tuning as TOML
//!
//! A plan file carries the parameter record for a solve together with the
//! rendering and report settings. Each struct implements `Default`, so an
//! empty file (or no file at all) is a valid plan with no parameters set.

use super::defaults;
use crate::types::{WellParameters, WellType};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a well plan.
///
/// Load with `PlanConfig::load()` which searches:
/// 1. `$WELLPATH_CONFIG` env var
/// 2. `./well_plan.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Well identification and profile selection
    #[serde(default)]
    pub well: WellInfo,

    /// Parameter record handed to the solver
    #[serde(default)]
    pub parameters: WellParameters,

    /// Plot sampling and canvas settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Waypoint table formatting
    #[serde(default)]
    pub report: ReportConfig,
}

impl PlanConfig {
    /// Load configuration using the standard search order:
    /// 1. `$WELLPATH_CONFIG` environment variable
    /// 2. `./well_plan.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), well = %config.well.name, "Loaded well plan from WELLPATH_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load plan from WELLPATH_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "WELLPATH_CONFIG points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(well = %config.well.name, "Loaded well plan from ./well_plan.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./well_plan.toml, using defaults");
                }
            }
        }

        info!("No well_plan.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents, &path.display().to_string())
    }

    /// Parse and validate plan TOML. `source` names the input in errors.
    ///
    /// Unknown keys only produce warnings; impossible values are errors.
    pub fn from_toml_str(contents: &str, source: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!(source, "{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(source.to_string(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the plan to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Well plan saved");
        Ok(())
    }

    /// Starter plan: the classic 1000/5000/3000 ft, 2°/100ft build & hold.
    pub fn template() -> Self {
        Self {
            well: WellInfo {
                name: "EXAMPLE-1".to_string(),
                ..WellInfo::default()
            },
            parameters: WellParameters {
                kickoff_tvd: Some(1000.0),
                target_tvd: Some(5000.0),
                target_displacement: Some(3000.0),
                build_rate: Some(2.0),
                ..WellParameters::default()
            },
            ..Self::default()
        }
    }

    /// Validate render/report settings.
    ///
    /// Rules:
    /// - Canvas dimensions must be positive and finite
    /// - Margins must leave a drawable area
    /// - Samples per arc and ticks per axis within bounds
    /// - Report precision within bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();
        let r = &self.render;

        Self::check_dimension(r.width, "render.width", &mut errors);
        Self::check_dimension(r.height, "render.height", &mut errors);

        if !r.margin.is_finite() || r.margin < 0.0 {
            errors.push(format!("render.margin must be a finite value >= 0 (got {})", r.margin));
        } else if 2.0 * r.margin >= r.width.min(r.height) {
            errors.push(format!(
                "render.margin ({:.1}) leaves no drawable area on a {:.0}x{:.0} canvas",
                r.margin, r.width, r.height
            ));
        }
        if r.samples_per_arc == 0 || r.samples_per_arc > defaults::MAX_SAMPLES_PER_ARC {
            errors.push(format!(
                "render.samples_per_arc must be in 1..={} (got {})",
                defaults::MAX_SAMPLES_PER_ARC,
                r.samples_per_arc
            ));
        }
        if r.tick_count < 2 || r.tick_count > defaults::MAX_TICK_COUNT {
            errors.push(format!(
                "render.tick_count must be in 2..={} (got {})",
                defaults::MAX_TICK_COUNT,
                r.tick_count
            ));
        }

        if self.report.precision > defaults::MAX_REPORT_PRECISION {
            errors.push(format!(
                "report.precision ({}) must be <= {}",
                self.report.precision,
                defaults::MAX_REPORT_PRECISION
            ));
        }

        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_dimension(value: f64, name: &str, errors: &mut Vec<String>) {
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!("{name} must be a finite value > 0 (got {value})"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({0}): {1}")]
    Parse(String, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Well Info
// ============================================================================

/// Identification metadata plus the profile to solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellInfo {
    /// Well name / identifier
    #[serde(default = "default_well_name")]
    pub name: String,

    /// Field name
    #[serde(default)]
    pub field: String,

    /// Rig name
    #[serde(default)]
    pub rig: String,

    /// Well profile: "build_hold", "build_drop" or "multi_case"
    #[serde(default)]
    pub profile: WellType,
}

fn default_well_name() -> String {
    "DEFAULT".to_string()
}

impl Default for WellInfo {
    fn default() -> Self {
        Self {
            name: default_well_name(),
            field: String::new(),
            rig: String::new(),
            profile: WellType::default(),
        }
    }
}

// ============================================================================
// Render Config
// ============================================================================

/// Plot sampling and canvas geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Canvas width (px)
    #[serde(default = "default_width")]
    pub width: f64,

    /// Canvas height (px)
    #[serde(default = "default_height")]
    pub height: f64,

    /// Free margin on every side (px)
    #[serde(default = "default_margin")]
    pub margin: f64,

    /// Interpolation steps per arc
    #[serde(default = "default_samples_per_arc")]
    pub samples_per_arc: usize,

    /// Labelled ticks per axis
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
}

fn default_width() -> f64 { defaults::CANVAS_WIDTH }
fn default_height() -> f64 { defaults::CANVAS_HEIGHT }
fn default_margin() -> f64 { defaults::CANVAS_MARGIN }
fn default_samples_per_arc() -> usize { defaults::SAMPLES_PER_ARC }
fn default_tick_count() -> usize { defaults::TICK_COUNT }

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
            samples_per_arc: default_samples_per_arc(),
            tick_count: default_tick_count(),
        }
    }
}

// ============================================================================
// Report Config
// ============================================================================

/// Waypoint table formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Decimal places for depths and displacements
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Unit label shown in table headers
    #[serde(default = "default_length_unit")]
    pub length_unit: String,
}

fn default_precision() -> usize { defaults::REPORT_PRECISION }
fn default_length_unit() -> String { defaults::LENGTH_UNIT.to_string() }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            length_unit: default_length_unit(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
