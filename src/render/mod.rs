//! Rendering: arc sampling, viewport projection and SVG output.
//!
//! Data flows one way: `SolvedTrajectory` → `sample` → `SampledPath` →
//! `project` → `Projection` → `render_svg`. Every step is a pure function
//! of its inputs, so redraws can simply recompute from the trajectory.

pub mod sampler;
pub mod svg;
pub mod viewport;

pub use sampler::{sample, sample_arc, sample_with, PathMarker, SampledPath};
pub use svg::render_svg;
pub use viewport::{
    project, project_with_ticks, AxisTick, Bounds, DevicePoint, ProjectedMarker, Projection,
};
