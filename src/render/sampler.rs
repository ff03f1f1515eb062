//! Arc sampler: flattens a solved trajectory into a polyline.
//!
//! Straight sections contribute their end waypoint only; each arc is
//! expanded into evenly spaced points by interpolating the inclination
//! between its start and end angles, so the plotted curve follows the true
//! circle instead of a chord.

use crate::config::defaults::{MAX_SAMPLES_PER_ARC, SAMPLES_PER_ARC};
use crate::types::{ArcDescriptor, PathPoint, SolvedTrajectory, WellType};
use serde::{Deserialize, Serialize};

/// A waypoint position kept alongside the sampled polyline for labelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathMarker {
    pub name: String,
    pub position: PathPoint,
}

/// Ordered (vertical, horizontal) points along the hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledPath {
    pub well_type: WellType,
    pub points: Vec<PathPoint>,
    pub markers: Vec<PathMarker>,
}

impl SampledPath {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Points along `arc` starting at `start`, `steps + 1` of them.
///
/// The first point is `start` itself and the last is the arc's end point.
/// `steps` is clamped to `1..=MAX_SAMPLES_PER_ARC`; zero gives a chord.
pub fn sample_arc(start: PathPoint, arc: &ArcDescriptor, steps: usize) -> Vec<PathPoint> {
    let steps = steps.clamp(1, MAX_SAMPLES_PER_ARC);
    (0..=steps)
        .map(|k| {
            if k == 0 {
                start
            } else {
                let t = k as f64 / steps as f64;
                arc.point_at(start, arc.angle_at(t))
            }
        })
        .collect()
}

/// Sample a trajectory with the default step count per arc.
pub fn sample(trajectory: &SolvedTrajectory) -> SampledPath {
    sample_with(trajectory, SAMPLES_PER_ARC)
}

/// Sample a trajectory with `steps` interpolation steps per arc.
///
/// Every waypoint appears in the output at its own position; arc interior
/// points sit between the arc's start waypoint and the one after it.
pub fn sample_with(trajectory: &SolvedTrajectory, steps: usize) -> SampledPath {
    let steps = steps.clamp(1, MAX_SAMPLES_PER_ARC);
    let waypoints = &trajectory.waypoints;
    let mut points = Vec::with_capacity(waypoints.len().saturating_mul(steps.saturating_add(1)));

    for (i, wp) in waypoints.iter().enumerate() {
        points.push(wp.position());

        let has_next = i + 1 < waypoints.len();
        if let (Some(arc), true) = (wp.arc.as_ref(), has_next) {
            let arc_points = sample_arc(wp.position(), arc, steps);
            // interior only; the next waypoint closes the arc
            let interior = arc_points.len().saturating_sub(1);
            points.extend_from_slice(&arc_points[1..interior]);
        }
    }

    let markers = waypoints
        .iter()
        .map(|wp| PathMarker {
            name: wp.name.clone(),
            position: wp.position(),
        })
        .collect();

    SampledPath {
        well_type: trajectory.well_type,
        points,
        markers,
    }
}
