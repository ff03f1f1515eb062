//! Trajectory Solver Module
//!
//! Deterministic closed-form solvers that turn a partially specified well
//! geometry into a fully determined chain of waypoints.
//!
//! ## Profiles
//! - `solve_build_hold()` - Type I: build arc + straight hold to target
//! - `solve_build_drop()` - Type II: build, tangent, drop, final hold
//! - `solve_multi_case()` - Type III: build arc to target, four input cases
//!
//! Every solver reads the whole parameter record, validates the subset it
//! needs and returns either a `SolvedTrajectory` or a `GeometryError`.
//! Nothing here holds state between calls.

pub mod build_drop;
pub mod build_hold;
pub mod geometry;
pub mod multi_case;

pub use build_drop::solve_build_drop;
pub use build_hold::solve_build_hold;
pub use multi_case::solve_multi_case;

use crate::types::{ParamField, SolvedTrajectory, WellParameters, WellType};
use thiserror::Error;
use tracing::debug;

// ============================================================================
// Error Type
// ============================================================================

/// Reasons a solve can fail. None of them are fatal to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A required field was absent or non-numeric
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// A field violated a positivity or ordering precondition
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// The inputs cannot form a real well path
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Type III input matched zero or several recognised combinations
    #[error("Ambiguous case: {0}")]
    AmbiguousCase(String),
}

impl GeometryError {
    fn missing(fields: &[ParamField]) -> Self {
        let names: Vec<String> = fields.iter().map(ToString::to_string).collect();
        GeometryError::MissingInput(format!(
            "please enter all values; missing {}",
            names.join(", ")
        ))
    }
}

// ============================================================================
// Entry Point
// ============================================================================

/// Solve the requested profile from a parameter record.
///
/// Fields the profile does not use are ignored.
pub fn solve(
    well_type: WellType,
    params: &WellParameters,
) -> Result<SolvedTrajectory, GeometryError> {
    let result = match well_type {
        WellType::BuildHold => solve_build_hold(params),
        WellType::BuildDrop => solve_build_drop(params),
        WellType::MultiCase => solve_multi_case(params),
    };

    match &result {
        Ok(t) => debug!(
            profile = %well_type,
            waypoints = t.waypoints.len(),
            total_md = t.total_measured_depth(),
            "Trajectory solved"
        ),
        Err(e) => debug!(profile = %well_type, error = %e, "Trajectory solve rejected"),
    }
    result
}

// ============================================================================
// Shared Validation Helpers
// ============================================================================

/// Fetch a fixed set of required fields, naming every missing one at once.
pub(crate) fn require<const N: usize>(
    params: &WellParameters,
    fields: [ParamField; N],
) -> Result<[f64; N], GeometryError> {
    let mut values = [0.0; N];
    let mut missing = Vec::new();
    for (slot, field) in values.iter_mut().zip(fields) {
        match params.get(field) {
            Some(v) => *slot = v,
            None => missing.push(field),
        }
    }
    if missing.is_empty() {
        Ok(values)
    } else {
        Err(GeometryError::missing(&missing))
    }
}

/// Resolve the target horizontal displacement.
///
/// H_t wins when given; otherwise all four planar coordinates must be present.
/// Returns `Ok(None)` when neither H_t nor any coordinate was supplied.
pub(crate) fn resolve_displacement(
    params: &WellParameters,
) -> Result<Option<f64>, GeometryError> {
    if let Some(h) = params.get(ParamField::TargetDisplacement) {
        return Ok(Some(h));
    }

    let missing: Vec<ParamField> = ParamField::COORDINATES
        .into_iter()
        .filter(|f| !params.is_set(*f))
        .collect();

    match missing.len() {
        0 => {
            let [se, sn, te, tn] = require(params, ParamField::COORDINATES)?;
            Ok(Some(geometry::planar_distance(se, sn, te, tn)))
        }
        4 => Ok(None),
        _ => {
            let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
            Err(GeometryError::MissingInput(format!(
                "target_displacement (H_t) was not given, so all four planar coordinates are required; missing {}",
                names.join(", ")
            )))
        }
    }
}

/// Message listing the two accepted ways of supplying H_t.
pub(crate) fn displacement_required_message() -> String {
    format!(
        "requires target_displacement (H_t) or all four of {}",
        ParamField::COORDINATES
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    )
}

pub(crate) fn ensure_positive(value: f64, field: ParamField) -> Result<(), GeometryError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidRange(format!(
            "please enter valid positive values; {field} must be > 0 (got {value})"
        )))
    }
}

pub(crate) fn ensure_non_negative(value: f64, field: ParamField) -> Result<(), GeometryError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidRange(format!(
            "please enter valid positive values; {field} cannot be negative (got {value})"
        )))
    }
}

/// Target must lie below the kickoff point.
pub(crate) fn ensure_below(
    deeper: f64,
    deeper_field: ParamField,
    shallower: f64,
    shallower_field: ParamField,
) -> Result<(), GeometryError> {
    if deeper > shallower {
        Ok(())
    } else {
        Err(GeometryError::InvalidRange(format!(
            "{} must be greater than {} ({deeper} <= {shallower})",
            deeper_field, shallower_field
        )))
    }
}

/// Inclination in degrees must lie in (0, 90].
pub(crate) fn ensure_inclination(value: f64, field: ParamField) -> Result<(), GeometryError> {
    if value > 0.0 && value <= 90.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidRange(format!(
            "{field} must be within (0°, 90°] (got {value}°)"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_names_every_missing_field() {
        let params = WellParameters {
            target_tvd: Some(5000.0),
            ..Default::default()
        };
        let err = require(
            &params,
            [ParamField::KickoffTvd, ParamField::TargetTvd, ParamField::BuildRate],
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, GeometryError::MissingInput(_)));
        assert!(msg.contains("kickoff_tvd"), "{}", msg);
        assert!(msg.contains("build_rate"), "{}", msg);
        assert!(!msg.contains("target_tvd"), "{}", msg);
    }

    #[test]
    fn test_displacement_from_coordinates() {
        let params = WellParameters {
            surface_east: Some(1000.0),
            surface_north: Some(2000.0),
            target_east: Some(4000.0),
            target_north: Some(6000.0),
            ..Default::default()
        };
        assert_eq!(resolve_displacement(&params), Ok(Some(5000.0)));
    }

    #[test]
    fn test_direct_displacement_wins_over_coordinates() {
        let params = WellParameters {
            target_displacement: Some(1200.0),
            surface_east: Some(0.0),
            ..Default::default()
        };
        assert_eq!(resolve_displacement(&params), Ok(Some(1200.0)));
    }

    #[test]
    fn test_partial_coordinates_are_rejected() {
        let params = WellParameters {
            surface_east: Some(0.0),
            surface_north: Some(0.0),
            target_east: Some(100.0),
            ..Default::default()
        };
        let err = resolve_displacement(&params).unwrap_err();
        assert!(matches!(err, GeometryError::MissingInput(ref m) if m.contains("target_north")));
    }

    #[test]
    fn test_no_displacement_at_all() {
        assert_eq!(resolve_displacement(&WellParameters::default()), Ok(None));
    }

    #[test]
    fn test_solve_dispatches_by_profile() {
        let params = WellParameters {
            kickoff_tvd: Some(1000.0),
            target_tvd: Some(5000.0),
            target_displacement: Some(3000.0),
            build_rate: Some(2.0),
            ..Default::default()
        };
        let t = solve(WellType::BuildHold, &params).unwrap();
        assert_eq!(t.well_type, WellType::BuildHold);
        assert_eq!(t.waypoints.len(), 4);

        // Same record is ambiguous for Type III (H_t, V_B and BUR all set)
        let err = solve(WellType::MultiCase, &params).unwrap_err();
        assert!(matches!(err, GeometryError::AmbiguousCase(_)));
    }
}
