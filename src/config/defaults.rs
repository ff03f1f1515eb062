//! System-wide default constants.
//!
//! Centralises magic numbers used by the solvers, renderer and report.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Solvers
// ============================================================================

/// Relative tolerance for a negative Type II tangent radicand.
///
/// Radicands down to `-TANGENT_CLAMP_TOLERANCE × (R1 + R2)²` are treated as
/// rounding noise and clamped to zero; anything more negative is rejected.
pub const TANGENT_CLAMP_TOLERANCE: f64 = 1e-4;

/// Negative hold inclinations down to this many radians are rounding noise
/// on a vertical well and snap to zero.
pub const VERTICAL_ANGLE_TOLERANCE: f64 = 1e-9;

// ============================================================================
// Rendering
// ============================================================================

/// Interpolation steps per arc when sampling a trajectory for plotting.
pub const SAMPLES_PER_ARC: usize = 20;

/// Upper bound accepted for `render.samples_per_arc`.
pub const MAX_SAMPLES_PER_ARC: usize = 10_000;

/// Number of labelled ticks per axis.
pub const TICK_COUNT: usize = 5;

/// Upper bound accepted for `render.tick_count`.
pub const MAX_TICK_COUNT: usize = 100;

/// Default canvas width (px).
pub const CANVAS_WIDTH: f64 = 800.0;

/// Default canvas height (px).
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Default margin kept free on every side of the canvas (px).
pub const CANVAS_MARGIN: f64 = 50.0;

/// Padding applied to each side of a degenerate (zero-width) data axis.
pub const DEGENERATE_AXIS_PADDING: f64 = 1.0;

// ============================================================================
// Report
// ============================================================================

/// Decimal places used in waypoint tables.
pub const REPORT_PRECISION: usize = 3;

/// Upper bound accepted for `report.precision`.
pub const MAX_REPORT_PRECISION: usize = 10;

/// Length unit label printed next to depths.
pub const LENGTH_UNIT: &str = "ft";

// ============================================================================
// Config Discovery
// ============================================================================

/// Environment variable pointing at a plan file.
pub const CONFIG_ENV_VAR: &str = "WELLPATH_CONFIG";

/// Plan file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "well_plan.toml";
