//! Type II well: build, tangent, drop ("S" profile)
//!
//! ```text
//!  A ── surface
//!  B ── kickoff (V_B), build at BUR (radius R1) to α1
//!  C ── end of build
//!  D ── end of tangent, drop at DOR (radius R2) from α1 to α2
//!  E ── end of drop (V_e)
//!  T ── target (V_t), straight at α2
//! ```
//!
//! The build angle comes from the line tangent to both arc circles. With O1
//! the build centre and O2 the drop centre, OP/OQ are the vertical and
//! horizontal legs of O1→O2:
//! - CD = √(OP² + OQ² − (R1 + R2)²)
//! - α1 = atan2(OQ, OP) + atan2(R1 + R2, CD)

use super::geometry::{
    deg_to_rad, rad_to_deg, radius_from_rate, ArcDescriptor, ArcSense, PathPoint,
};
use super::{
    displacement_required_message, ensure_below, ensure_non_negative, ensure_positive, require,
    resolve_displacement, GeometryError,
};
use crate::config::defaults::TANGENT_CLAMP_TOLERANCE;
use crate::types::{ParamField, SolutionSummary, SolvedTrajectory, WellParameters, WellType, Waypoint};
use std::f64::consts::FRAC_PI_2;
use tracing::{debug, warn};

/// Solve a build + drop profile.
///
/// Needs V_B, V_t, V_e, BUR, DOR, α2 and either H_t or all four planar
/// coordinates. Waypoint positions are chained: each one is the previous
/// one plus the geometry of the section between them.
///
/// # Errors
/// - `MissingInput` naming the missing fields or the missing H_t/coordinates
/// - `InvalidRange` for non-positive rates, depth ordering, or α2 outside [0°, 90°)
/// - `InvalidGeometry` when no S-profile with these rates reaches the target
pub fn solve_build_drop(params: &WellParameters) -> Result<SolvedTrajectory, GeometryError> {
    let [v_b, v_t, v_e, bur, dor, alpha2_deg] = require(
        params,
        [
            ParamField::KickoffTvd,
            ParamField::TargetTvd,
            ParamField::EndOfDropTvd,
            ParamField::BuildRate,
            ParamField::DropRate,
            ParamField::FinalInclination,
        ],
    )?;
    let h_t = resolve_displacement(params)?.ok_or_else(|| {
        GeometryError::MissingInput(format!(
            "build + drop profile {}",
            displacement_required_message()
        ))
    })?;

    ensure_positive(bur, ParamField::BuildRate)?;
    ensure_positive(dor, ParamField::DropRate)?;
    ensure_non_negative(v_b, ParamField::KickoffTvd)?;
    ensure_non_negative(h_t, ParamField::TargetDisplacement)?;
    ensure_below(v_e, ParamField::EndOfDropTvd, v_b, ParamField::KickoffTvd)?;
    if v_t < v_e {
        return Err(GeometryError::InvalidRange(format!(
            "{} must not be above {} ({v_t} < {v_e})",
            ParamField::TargetTvd,
            ParamField::EndOfDropTvd
        )));
    }
    if !(0.0..90.0).contains(&alpha2_deg) {
        return Err(GeometryError::InvalidRange(format!(
            "{} must be within [0°, 90°) (got {alpha2_deg}°)",
            ParamField::FinalInclination
        )));
    }

    let r1 = radius_from_rate(bur);
    let r2 = radius_from_rate(dor);
    let alpha2 = deg_to_rad(alpha2_deg);

    // Final hold runs from V_e to V_t at α2; back it out to get H at end of drop
    let hold_vertical = v_t - v_e;
    let h_e = h_t - hold_vertical * alpha2.tan();

    let op = v_e + r2 * alpha2.sin() - v_b;
    let oq = h_e - r2 * alpha2.cos() - r1;
    let radii = r1 + r2;
    let radicand = op * op + oq * oq - radii * radii;

    let tangent_clamped = radicand < 0.0;
    if tangent_clamped {
        if radicand < -TANGENT_CLAMP_TOLERANCE * radii * radii {
            return Err(GeometryError::InvalidGeometry(format!(
                "build and drop arcs overlap (R1 = {r1:.2}, R2 = {r2:.2}); \
                 no tangent section can join them, lower the rates or move the end of drop"
            )));
        }
        warn!(
            radicand,
            r1, r2, "Tangent radicand slightly negative, clamping tangent length to zero"
        );
    }
    let cd = radicand.max(0.0).sqrt();

    let x = oq.atan2(op);
    let y = radii.atan2(cd);
    let alpha1 = check_build_angle(x + y, alpha2)?;
    let alpha1_deg = rad_to_deg(alpha1);

    let surface = Waypoint::surface();

    let build = ArcDescriptor::new(r1, 0.0, alpha1_deg, ArcSense::Build);
    let kop = Waypoint::new("B", "Kickoff Point (KOP)", PathPoint::new(v_b, 0.0), v_b, 0.0)
        .with_arc(build);

    let eob = Waypoint::new(
        "C",
        "End of Build",
        build.end_point(kop.position()),
        kop.measured_depth + build.length(),
        alpha1_deg,
    );

    let drop = ArcDescriptor::new(r2, alpha1_deg, alpha2_deg, ArcSense::Drop);
    let eot = Waypoint::new(
        "D",
        "End of Tangent",
        eob.position().advance(cd, alpha1_deg),
        eob.measured_depth + cd,
        alpha1_deg,
    )
    .with_arc(drop);

    let eod = Waypoint::new(
        "E",
        "End of Drop",
        drop.end_point(eot.position()),
        eot.measured_depth + drop.length(),
        alpha2_deg,
    );

    let target = Waypoint::new(
        "T",
        "Target",
        eod.position()
            .offset(hold_vertical, hold_vertical * alpha2.tan()),
        eod.measured_depth + hold_vertical / alpha2.cos(),
        alpha2_deg,
    );

    debug!(
        r1,
        r2,
        op,
        oq,
        tangent = cd,
        alpha1_deg,
        target_md = target.measured_depth,
        "Build + drop solved"
    );

    let mut summary = SolutionSummary::new(r1, bur, v_b, alpha1_deg, alpha2_deg, h_t);
    summary.drop_radius = Some(r2);
    summary.drop_rate = Some(dor);
    summary.tangent_length = Some(cd);
    summary.tangent_clamped = tangent_clamped;

    Ok(SolvedTrajectory {
        well_type: WellType::BuildDrop,
        waypoints: vec![surface, kop, eob, eot, eod, target],
        summary,
    })
}

/// The build angle must lie in (0, π/2) and be at least the final
/// inclination. NaN fails the range check.
fn check_build_angle(alpha1: f64, alpha2: f64) -> Result<f64, GeometryError> {
    if !(alpha1 > 0.0 && alpha1 < FRAC_PI_2) {
        return Err(GeometryError::InvalidGeometry(format!(
            "build angle {:.2}° is outside (0°, 90°); check H_t against the depths",
            rad_to_deg(alpha1)
        )));
    }
    if alpha1 < alpha2 {
        return Err(GeometryError::InvalidGeometry(format!(
            "build angle {:.2}° is below the final inclination {:.2}°; nothing to drop",
            rad_to_deg(alpha1),
            rad_to_deg(alpha2)
        )));
    }
    Ok(alpha1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s_well() -> WellParameters {
        WellParameters {
            kickoff_tvd: Some(1000.0),
            target_tvd: Some(9000.0),
            end_of_drop_tvd: Some(8000.0),
            target_displacement: Some(3000.0),
            build_rate: Some(2.0),
            drop_rate: Some(1.5),
            final_inclination: Some(10.0),
            ..Default::default()
        }
    }

    /// Build 0→30° at 2°/100 then immediately drop 30→0° at 1.5°/100.
    fn zero_tangent_well(extra_displacement: f64) -> WellParameters {
        let r1 = radius_from_rate(2.0);
        let r2 = radius_from_rate(1.5);
        let a = deg_to_rad(30.0);
        let v_e = 1000.0 + (r1 + r2) * a.sin();
        let h_e = (r1 + r2) * (1.0 - a.cos());
        WellParameters {
            kickoff_tvd: Some(1000.0),
            target_tvd: Some(v_e + 1000.0),
            end_of_drop_tvd: Some(v_e),
            target_displacement: Some(h_e + extra_displacement),
            build_rate: Some(2.0),
            drop_rate: Some(1.5),
            final_inclination: Some(0.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_s_well_solution() {
        let t = solve_build_drop(&s_well()).unwrap();
        let s = &t.summary;

        assert!((s.build_angle - 24.993).abs() < 1e-3, "α1 = {}", s.build_angle);
        assert!((s.tangent_length.unwrap() - 5338.975).abs() < 1e-3);
        assert!(!s.tangent_clamped);

        let names: Vec<&str> = t.waypoints.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C", "D", "E", "T"]);
    }

    #[test]
    fn test_chain_lands_on_end_of_drop_and_target() {
        let t = solve_build_drop(&s_well()).unwrap();

        let e = t.waypoint("E").unwrap();
        assert!((e.vertical - 8000.0).abs() < 1e-6, "V_E = {}", e.vertical);
        assert!((e.inclination - 10.0).abs() < 1e-12);

        let target = t.target().unwrap();
        assert!((target.vertical - 9000.0).abs() < 1e-6);
        assert!((target.horizontal - 3000.0).abs() < 1e-6, "H_T = {}", target.horizontal);
        assert!((target.measured_depth - 9603.589).abs() < 1e-3);
    }

    #[test]
    fn test_arcs_attached_to_section_starts() {
        let t = solve_build_drop(&s_well()).unwrap();
        let build = t.waypoint("B").unwrap().arc.unwrap();
        let drop = t.waypoint("D").unwrap().arc.unwrap();

        assert_eq!(build.sense, ArcSense::Build);
        assert_eq!(drop.sense, ArcSense::Drop);
        assert!((drop.start_angle - t.summary.build_angle).abs() < 1e-12);
        assert!((drop.end_angle - 10.0).abs() < 1e-12);
        assert!(t.waypoint("C").unwrap().arc.is_none());
        assert!(t.waypoint("E").unwrap().arc.is_none());
    }

    #[test]
    fn test_displacement_from_coordinates() {
        let params = WellParameters {
            target_displacement: None,
            surface_east: Some(500.0),
            surface_north: Some(500.0),
            target_east: Some(2300.0),
            target_north: Some(2900.0),
            ..s_well()
        };
        let t = solve_build_drop(&params).unwrap();
        assert!((t.summary.target_displacement - 3000.0).abs() < 1e-9);
        assert!((t.target().unwrap().horizontal - 3000.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_displacement_and_coordinates() {
        let params = WellParameters {
            target_displacement: None,
            ..s_well()
        };
        let err = solve_build_drop(&params).unwrap_err();
        match err {
            GeometryError::MissingInput(msg) => {
                assert!(msg.contains("target_displacement"), "{}", msg);
                assert!(msg.contains("surface_east"), "{}", msg);
            }
            other => panic!("expected MissingInput, got {:?}", other),
        }
    }

    #[test]
    fn test_non_positive_drop_rate() {
        let params = WellParameters {
            drop_rate: Some(-1.0),
            ..s_well()
        };
        assert!(matches!(
            solve_build_drop(&params),
            Err(GeometryError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_exact_zero_tangent() {
        let t = solve_build_drop(&zero_tangent_well(0.0)).unwrap();
        assert!(t.summary.tangent_length.unwrap() < 1e-2);
        assert!((t.summary.build_angle - 30.0).abs() < 1e-4);

        let c = t.waypoint("C").unwrap();
        let d = t.waypoint("D").unwrap();
        assert!(c.position().approx_eq(d.position(), 1e-2));
    }

    #[test]
    fn test_near_degenerate_tangent_is_clamped() {
        let t = solve_build_drop(&zero_tangent_well(0.05)).unwrap();
        assert!(t.summary.tangent_clamped);
        assert_eq!(t.summary.tangent_length, Some(0.0));
    }

    #[test]
    fn test_overlapping_arcs_rejected() {
        let err = solve_build_drop(&zero_tangent_well(50.0)).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidGeometry(_)), "{:?}", err);
    }

    #[test]
    fn test_build_angle_guard() {
        for bad in [f64::NAN, 0.0, -0.1, FRAC_PI_2] {
            assert!(
                matches!(check_build_angle(bad, 0.0), Err(GeometryError::InvalidGeometry(_))),
                "{bad} accepted"
            );
        }
        assert!(matches!(check_build_angle(0.2, 0.3), Err(GeometryError::InvalidGeometry(_))));
        assert_eq!(check_build_angle(0.4, 0.3).unwrap(), 0.4);
    }

    #[test]
    fn test_measured_depth_non_decreasing() {
        let t = solve_build_drop(&s_well()).unwrap();
        for pair in t.waypoints.windows(2) {
            assert!(
                pair[1].measured_depth >= pair[0].measured_depth,
                "{} -> {}",
                pair[0].name,
                pair[1].name
            );
        }
    }
}
