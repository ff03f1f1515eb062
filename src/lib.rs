//! Wellpath: 2D directional well trajectory planning
//!
//! Solves vertical-section well profiles from a handful of planning
//! parameters and turns the result into tables and plots.
//!
//! ## Architecture
//!
//! - **Trajectory**: geometry primitives and the three profile solvers
//!   (build & hold, build + drop, multi-case build & hold)
//! - **Render**: arc sampler, auto-fit viewport projector, SVG chart
//! - **Report**: fixed-precision waypoint table, CSV and JSON export
//! - **Config**: TOML plan files with typo detection and range checks

pub mod config;
pub mod render;
pub mod report;
pub mod trajectory;
pub mod types;

// Re-export plan configuration
pub use config::PlanConfig;

// Re-export commonly used types
pub use types::{
    ArcDescriptor, ArcSense, MultiCase, ParamField, PathPoint, SolutionSummary, SolvedTrajectory,
    WellParameters, WellType, Waypoint,
};

// Re-export entry points
pub use render::{project, render_svg, sample, Projection, SampledPath};
pub use report::{ReportError, TrajectoryReport, WaypointTable};
pub use trajectory::{solve, GeometryError};
