//! Type I well: build and hold
//!
//! Vertical to the kickoff point, a single build arc at constant BUR, then a
//! straight hold section to the target.
//!
//! ```text
//!  A ── surface
//!  │
//!  B ── kickoff (V_B)
//!   ╲  build arc, radius R
//!    C ── end of build, inclination α
//!     ╲
//!      ╲ hold
//!       T ── target (V_t, H_t)
//! ```

use super::geometry::{deg_to_rad, rad_to_deg, radius_from_rate, ArcDescriptor, ArcSense, PathPoint};
use super::{ensure_below, ensure_non_negative, ensure_positive, require, GeometryError};
use crate::config::defaults::VERTICAL_ANGLE_TOLERANCE;
use crate::types::{ParamField, SolutionSummary, SolvedTrajectory, WellParameters, WellType, Waypoint};
use std::f64::consts::FRAC_PI_2;
use tracing::debug;

/// Solve a build & hold profile from V_B, V_t, H_t and BUR.
///
/// With D = V_t − V_B:
/// - R = 18000 / (π × BUR)
/// - x = atan((H_t − R) / D)
/// - α = x + asin(R × cos(x) / D)
///
/// # Errors
/// - `MissingInput` when any of the four inputs is unset
/// - `InvalidRange` for negative depths, BUR ≤ 0, or V_t ≤ V_B
/// - `InvalidGeometry` when the target sits inside the build circle or
///   would need a hold at or beyond horizontal
pub fn solve_build_hold(params: &WellParameters) -> Result<SolvedTrajectory, GeometryError> {
    let [v_b, v_t, h_t, bur] = require(
        params,
        [
            ParamField::KickoffTvd,
            ParamField::TargetTvd,
            ParamField::TargetDisplacement,
            ParamField::BuildRate,
        ],
    )?;

    ensure_non_negative(v_b, ParamField::KickoffTvd)?;
    ensure_non_negative(v_t, ParamField::TargetTvd)?;
    ensure_non_negative(h_t, ParamField::TargetDisplacement)?;
    ensure_positive(bur, ParamField::BuildRate)?;
    ensure_below(v_t, ParamField::TargetTvd, v_b, ParamField::KickoffTvd)?;

    let r = radius_from_rate(bur);
    let d = v_t - v_b;
    let x = ((h_t - r) / d).atan();

    let sin_arg = r * x.cos() / d;
    if sin_arg > 1.0 {
        return Err(GeometryError::InvalidGeometry(format!(
            "target ({v_t}, {h_t}) lies inside the build circle of radius {r:.2}; \
             increase BUR or move the kickoff point up"
        )));
    }

    let alpha = hold_inclination(x + sin_arg.asin())?;
    let alpha_deg = rad_to_deg(alpha);

    let surface = Waypoint::surface();
    let build = ArcDescriptor::new(r, 0.0, alpha_deg, ArcSense::Build);
    let kop = Waypoint::new("B", "Kickoff Point (KOP)", PathPoint::new(v_b, 0.0), v_b, 0.0)
        .with_arc(build);

    let eob_pos = build.end_point(kop.position());
    let eob_md = kop.measured_depth + build.length();
    let eob = Waypoint::new("C", "End of Build", eob_pos, eob_md, alpha_deg);

    let hold_md = (v_t - eob_pos.vertical) / deg_to_rad(alpha_deg).cos();
    let target = Waypoint::new(
        "T",
        "Target",
        PathPoint::new(v_t, h_t),
        eob_md + hold_md,
        alpha_deg,
    );

    debug!(
        radius = r,
        x_deg = rad_to_deg(x),
        alpha_deg,
        target_md = target.measured_depth,
        "Build & hold solved"
    );

    let mut summary = SolutionSummary::new(r, bur, v_b, alpha_deg, alpha_deg, h_t);
    summary.auxiliary_angle = Some(rad_to_deg(x));

    Ok(SolvedTrajectory {
        well_type: WellType::BuildHold,
        waypoints: vec![surface, kop, eob, target],
        summary,
    })
}

/// Check the tangent construction's hold angle (radians) and snap rounding
/// noise around vertical to zero.
fn hold_inclination(alpha: f64) -> Result<f64, GeometryError> {
    if alpha.is_nan() || alpha <= -VERTICAL_ANGLE_TOLERANCE {
        return Err(GeometryError::InvalidGeometry(format!(
            "hold inclination {:.2}° is not a valid build angle",
            rad_to_deg(alpha)
        )));
    }
    if alpha >= FRAC_PI_2 {
        return Err(GeometryError::InvalidGeometry(format!(
            "hold inclination {:.2}° reaches horizontal; target cannot be hit with a build & hold",
            rad_to_deg(alpha)
        )));
    }
    Ok(alpha.max(0.0))
}
