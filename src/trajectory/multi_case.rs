//! Type III well: build to target, solved from alternative known quantities
//!
//! V_t is always required. Of {H_t, V_B, BUR, α2} exactly one of these
//! pairs must be supplied:
//!
//! | Case | Known     | Solved for    |
//! |------|-----------|---------------|
//! | 1    | H_t, V_B  | α2, R, BUR    |
//! | 2    | H_t, BUR  | R, α2, V_B    |
//! | 3    | H_t, α2   | R, V_B, BUR   |
//! | 4    | V_B, α2   | R, H_t, BUR   |
//!
//! H_t may come from the four planar coordinates instead.

use super::geometry::{deg_to_rad, rad_to_deg, radius_from_rate, rate_from_radius, ArcDescriptor, ArcSense, PathPoint};
use super::{
    ensure_below, ensure_inclination, ensure_non_negative, ensure_positive, require,
    resolve_displacement, GeometryError,
};
use crate::types::{MultiCase, ParamField, SolutionSummary, SolvedTrajectory, WellParameters, WellType, Waypoint};
use tracing::debug;

/// Which of the four case-selecting quantities were supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuppliedFields {
    pub displacement: bool,
    pub kickoff: bool,
    pub build_rate: bool,
    pub inclination: bool,
}

impl SuppliedFields {
    fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.displacement {
            parts.push("H_t");
        }
        if self.kickoff {
            parts.push("V_B");
        }
        if self.build_rate {
            parts.push("BUR");
        }
        if self.inclination {
            parts.push("α2");
        }
        if parts.is_empty() {
            "nothing besides V_t".to_string()
        } else {
            parts.join(" + ")
        }
    }
}

impl MultiCase {
    /// Exact required/forbidden field set for this case.
    pub fn signature(&self) -> SuppliedFields {
        match self {
            MultiCase::DisplacementKickoff => SuppliedFields {
                displacement: true,
                kickoff: true,
                ..Default::default()
            },
            MultiCase::DisplacementBuildRate => SuppliedFields {
                displacement: true,
                build_rate: true,
                ..Default::default()
            },
            MultiCase::DisplacementInclination => SuppliedFields {
                displacement: true,
                inclination: true,
                ..Default::default()
            },
            MultiCase::KickoffInclination => SuppliedFields {
                kickoff: true,
                inclination: true,
                ..Default::default()
            },
        }
    }

    /// True when `supplied` is exactly this case's known pair.
    pub fn accepts(&self, supplied: &SuppliedFields) -> bool {
        self.signature() == *supplied
    }

    /// The single case matching `supplied`, if exactly one does.
    pub fn detect(supplied: &SuppliedFields) -> Option<MultiCase> {
        let mut matching = MultiCase::ALL.into_iter().filter(|c| c.accepts(supplied));
        match (matching.next(), matching.next()) {
            (Some(case), None) => Some(case),
            _ => None,
        }
    }
}

fn ambiguous(supplied: &SuppliedFields) -> GeometryError {
    let options: Vec<String> = MultiCase::ALL
        .iter()
        .map(|c| format!("{}) {}", c.number(), c.known()))
        .collect();
    GeometryError::AmbiguousCase(format!(
        "supplied {} together with V_t; provide exactly one of: {}",
        supplied.describe(),
        options.join(", ")
    ))
}

/// Solve a Type III build profile.
///
/// # Errors
/// - `MissingInput` when V_t is unset or planar coordinates are incomplete
/// - `AmbiguousCase` when the supplied fields match no case, or several
/// - `InvalidRange` for depth ordering, non-positive values, α2 outside (0°, 90°]
/// - `InvalidGeometry` when a derived trig argument leaves its domain or the
///   kickoff would land above surface
pub fn solve_multi_case(params: &WellParameters) -> Result<SolvedTrajectory, GeometryError> {
    let [v_t] = require(params, [ParamField::TargetTvd])?;
    ensure_positive(v_t, ParamField::TargetTvd)?;

    let h_t = resolve_displacement(params)?;
    let v_b = params.get(ParamField::KickoffTvd);
    let bur = params.get(ParamField::BuildRate);
    let alpha2 = params.get(ParamField::FinalInclination);

    let supplied = SuppliedFields {
        displacement: h_t.is_some(),
        kickoff: v_b.is_some(),
        build_rate: bur.is_some(),
        inclination: alpha2.is_some(),
    };
    let case = MultiCase::detect(&supplied).ok_or_else(|| ambiguous(&supplied))?;

    let solution = match (case, h_t, v_b, bur, alpha2) {
        (MultiCase::DisplacementKickoff, Some(h), Some(v_b), None, None) => {
            displacement_and_kickoff(v_t, h, v_b)?
        }
        (MultiCase::DisplacementBuildRate, Some(h), None, Some(bur), None) => {
            displacement_and_build_rate(v_t, h, bur)?
        }
        (MultiCase::DisplacementInclination, Some(h), None, None, Some(a)) => {
            displacement_and_inclination(v_t, h, a)?
        }
        (MultiCase::KickoffInclination, None, Some(v_b), None, Some(a)) => {
            kickoff_and_inclination(v_t, v_b, a)?
        }
        _ => return Err(ambiguous(&supplied)),
    };

    debug!(
        case = case.number(),
        radius = solution.radius,
        alpha_deg = solution.alpha_deg,
        kickoff = solution.kickoff,
        bur = solution.build_rate,
        "Multi-case build solved"
    );

    Ok(assemble(case, &solution))
}

/// Closed-form result shared by all four cases.
#[derive(Debug, Clone, Copy)]
struct CaseSolution {
    kickoff: f64,
    radius: f64,
    alpha_deg: f64,
    build_rate: f64,
}

/// Case 1: α2 = 2·atan(H_t / (V_t − V_B)), R = (V_t − V_B) / sin α2
fn displacement_and_kickoff(v_t: f64, h: f64, v_b: f64) -> Result<CaseSolution, GeometryError> {
    ensure_non_negative(v_b, ParamField::KickoffTvd)?;
    ensure_below(v_t, ParamField::TargetTvd, v_b, ParamField::KickoffTvd)?;
    ensure_positive(h, ParamField::TargetDisplacement)?;

    let d = v_t - v_b;
    let alpha = 2.0 * (h / d).atan();
    if rad_to_deg(alpha) > 90.0 {
        return Err(GeometryError::InvalidGeometry(format!(
            "H_t {h} exceeds the vertical build interval {d}; the arc would pass horizontal"
        )));
    }
    let radius = d / alpha.sin();
    Ok(CaseSolution {
        kickoff: v_b,
        radius,
        alpha_deg: rad_to_deg(alpha),
        build_rate: rate_from_radius(radius),
    })
}

/// Case 2: R from BUR, α2 = acos((R − H_t) / R), V_B = V_t − R·sin α2
fn displacement_and_build_rate(v_t: f64, h: f64, bur: f64) -> Result<CaseSolution, GeometryError> {
    ensure_positive(bur, ParamField::BuildRate)?;
    ensure_positive(h, ParamField::TargetDisplacement)?;

    let radius = radius_from_rate(bur);
    let cos_alpha = (radius - h) / radius;
    if !(-1.0..=1.0).contains(&cos_alpha) {
        return Err(GeometryError::InvalidGeometry(format!(
            "acos argument (R − H_t)/R = {cos_alpha:.4} is outside [-1, 1] \
             (R = {radius:.2}, H_t = {h}); no build arc reaches this displacement"
        )));
    }
    let alpha = cos_alpha.acos();
    if rad_to_deg(alpha) > 90.0 {
        return Err(GeometryError::InvalidGeometry(format!(
            "H_t {h} exceeds the build radius {radius:.2}; the arc would pass horizontal"
        )));
    }
    let kickoff = v_t - radius * alpha.sin();
    if kickoff < 0.0 {
        return Err(GeometryError::InvalidGeometry(format!(
            "solved kickoff depth {kickoff:.2} lies above surface; increase BUR or V_t"
        )));
    }
    Ok(CaseSolution {
        kickoff,
        radius,
        alpha_deg: rad_to_deg(alpha),
        build_rate: bur,
    })
}

/// Case 3: R = H_t / (1 − cos α2), V_B = V_t − R·sin α2
fn displacement_and_inclination(
    v_t: f64,
    h: f64,
    alpha_deg: f64,
) -> Result<CaseSolution, GeometryError> {
    ensure_inclination(alpha_deg, ParamField::FinalInclination)?;
    ensure_positive(h, ParamField::TargetDisplacement)?;

    let alpha = deg_to_rad(alpha_deg);
    let radius = h / (1.0 - alpha.cos());
    let kickoff = v_t - radius * alpha.sin();
    if kickoff < 0.0 {
        return Err(GeometryError::InvalidGeometry(format!(
            "solved kickoff depth {kickoff:.2} lies above surface; raise α2 or V_t"
        )));
    }
    Ok(CaseSolution {
        kickoff,
        radius,
        alpha_deg,
        build_rate: rate_from_radius(radius),
    })
}

/// Case 4: R = (V_t − V_B) / sin α2, H_t = R·(1 − cos α2)
fn kickoff_and_inclination(v_t: f64, v_b: f64, alpha_deg: f64) -> Result<CaseSolution, GeometryError> {
    ensure_non_negative(v_b, ParamField::KickoffTvd)?;
    ensure_below(v_t, ParamField::TargetTvd, v_b, ParamField::KickoffTvd)?;
    ensure_inclination(alpha_deg, ParamField::FinalInclination)?;

    let radius = (v_t - v_b) / deg_to_rad(alpha_deg).sin();
    Ok(CaseSolution {
        kickoff: v_b,
        radius,
        alpha_deg,
        build_rate: rate_from_radius(radius),
    })
}

/// Surface → KOP → Target, target placed at the end of the solved arc.
fn assemble(case: MultiCase, s: &CaseSolution) -> SolvedTrajectory {
    let surface = Waypoint::surface();
    let build = ArcDescriptor::new(s.radius, 0.0, s.alpha_deg, ArcSense::Build);
    let kop = Waypoint::new(
        "B",
        "Kickoff Point (KOP)",
        PathPoint::new(s.kickoff, 0.0),
        s.kickoff,
        0.0,
    )
    .with_arc(build);

    let target = Waypoint::new(
        "T",
        "Target",
        build.end_point(kop.position()),
        kop.measured_depth + build.length(),
        s.alpha_deg,
    );

    let mut summary = SolutionSummary::new(
        s.radius,
        s.build_rate,
        s.kickoff,
        s.alpha_deg,
        s.alpha_deg,
        target.horizontal,
    );
    summary.case = Some(case);

    SolvedTrajectory {
        well_type: WellType::MultiCase,
        waypoints: vec![surface, kop, target],
        summary,
    }
}
