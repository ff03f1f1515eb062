//! Geometry primitives for planar well trajectories
//!
//! All positions live in the vertical section plane:
//! - `vertical` = true vertical depth, positive downward
//! - `horizontal` = horizontal displacement toward the target
//!
//! Angles cross this module boundary in degrees (inclination from vertical)
//! and are converted to radians only for trigonometry.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Numerator of the rate/radius conversion: 180° × 100 length-units.
///
/// `R = RATE_RADIUS_NUMERATOR / (π × rate)` with rate in °/100 length-units.
pub const RATE_RADIUS_NUMERATOR: f64 = 18_000.0;

// ============================================================================
// Angle & Rate Conversions
// ============================================================================

/// Degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Radians to degrees.
#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// Radius of curvature for a build/drop rate (°/100 length-units).
///
/// Formula: R = 18000 / (π × rate)
pub fn radius_from_rate(rate: f64) -> f64 {
    RATE_RADIUS_NUMERATOR / (PI * rate)
}

/// Build/drop rate (°/100 length-units) that produces the given radius.
///
/// The conversion is its own inverse.
pub fn rate_from_radius(radius: f64) -> f64 {
    RATE_RADIUS_NUMERATOR / (PI * radius)
}

/// Horizontal distance between two planar (East, North) locations.
pub fn planar_distance(east_a: f64, north_a: f64, east_b: f64, north_b: f64) -> f64 {
    (east_b - east_a).hypot(north_b - north_a)
}

// ============================================================================
// Points
// ============================================================================

/// A location in the vertical section plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub vertical: f64,
    pub horizontal: f64,
}

impl PathPoint {
    pub const fn new(vertical: f64, horizontal: f64) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Translate by a (vertical, horizontal) offset.
    pub fn offset(self, d_vertical: f64, d_horizontal: f64) -> Self {
        Self::new(self.vertical + d_vertical, self.horizontal + d_horizontal)
    }

    /// Step `length` along a straight line at `inclination_deg` from vertical.
    pub fn advance(self, length: f64, inclination_deg: f64) -> Self {
        let inc = deg_to_rad(inclination_deg);
        self.offset(length * inc.cos(), length * inc.sin())
    }

    pub fn distance_to(self, other: Self) -> f64 {
        (other.vertical - self.vertical).hypot(other.horizontal - self.horizontal)
    }

    /// True when both coordinates agree within `tolerance`.
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self.vertical - other.vertical).abs() <= tolerance
            && (self.horizontal - other.horizontal).abs() <= tolerance
    }
}

// ============================================================================
// Circular Arcs
// ============================================================================

/// Direction of inclination change along an arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcSense {
    /// Inclination increases; the hole turns away from vertical.
    Build,
    /// Inclination decreases; the hole turns back toward vertical.
    Drop,
}

impl std::fmt::Display for ArcSense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArcSense::Build => write!(f, "build"),
            ArcSense::Drop => write!(f, "drop"),
        }
    }
}

/// Circular arc attached to the waypoint where the arc starts.
///
/// Angles are inclinations in degrees. For `Build` the end angle is larger
/// than the start angle, for `Drop` it is smaller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcDescriptor {
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub sense: ArcSense,
}

impl ArcDescriptor {
    pub const fn new(radius: f64, start_angle: f64, end_angle: f64, sense: ArcSense) -> Self {
        Self {
            radius,
            start_angle,
            end_angle,
            sense,
        }
    }

    /// Arc whose radius is derived from a build/drop rate.
    pub fn from_rate(rate: f64, start_angle: f64, end_angle: f64, sense: ArcSense) -> Self {
        Self::new(radius_from_rate(rate), start_angle, end_angle, sense)
    }

    /// Absolute change of inclination across the arc, degrees.
    pub fn sweep(&self) -> f64 {
        (self.end_angle - self.start_angle).abs()
    }

    /// Along-hole length of the arc.
    pub fn length(&self) -> f64 {
        self.radius * deg_to_rad(self.sweep())
    }

    /// Inclination at fraction `t` (0 = start, 1 = end) of the arc.
    pub fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + (self.end_angle - self.start_angle) * t
    }

    /// (vertical, horizontal) offset from the arc start to the point where
    /// the inclination equals `angle_deg`.
    ///
    /// Build: ΔV = R(sin θ − sin θ₀), ΔH = R(cos θ₀ − cos θ)
    /// Drop:  ΔV = R(sin θ₀ − sin θ), ΔH = R(cos θ − cos θ₀)
    pub fn offset_at(&self, angle_deg: f64) -> (f64, f64) {
        let t0 = deg_to_rad(self.start_angle);
        let t = deg_to_rad(angle_deg);
        let r = self.radius;
        match self.sense {
            ArcSense::Build => (r * (t.sin() - t0.sin()), r * (t0.cos() - t.cos())),
            ArcSense::Drop => (r * (t0.sin() - t.sin()), r * (t.cos() - t0.cos())),
        }
    }

    /// Point on the arc at inclination `angle_deg`, given the arc start.
    pub fn point_at(&self, origin: PathPoint, angle_deg: f64) -> PathPoint {
        let (dv, dh) = self.offset_at(angle_deg);
        origin.offset(dv, dh)
    }

    /// Point where the arc ends, given the arc start.
    pub fn end_point(&self, origin: PathPoint) -> PathPoint {
        self.point_at(origin, self.end_angle)
    }
}
