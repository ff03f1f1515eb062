//! Shared data structures for directional well planning
//!
//! This module defines the types that flow through the planner:
//! - Input: `WellType` selector and `WellParameters` (the parameter record)
//! - Solver output: `Waypoint`, `SolvedTrajectory`, `SolutionSummary`
//! - Rendering input: `PathPoint` and `ArcDescriptor` (re-exported from geometry)

use serde::{Deserialize, Serialize};

pub use crate::trajectory::geometry::{ArcDescriptor, ArcSense, PathPoint};

// ============================================================================
// Well Profile Selector
// ============================================================================

/// Well profile to solve for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WellType {
    /// Type I: build section followed by a straight hold to target.
    #[default]
    BuildHold,
    /// Type II: build, tangent, drop, then a hold at the final inclination.
    BuildDrop,
    /// Type III: build to target, solved from one of four input combinations.
    #[serde(alias = "build_hold_multi_case")]
    MultiCase,
}

impl WellType {
    pub const ALL: [WellType; 3] = [WellType::BuildHold, WellType::BuildDrop, WellType::MultiCase];
}

impl std::fmt::Display for WellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WellType::BuildHold => write!(f, "Type I (Build & Hold)"),
            WellType::BuildDrop => write!(f, "Type II (Build + Drop)"),
            WellType::MultiCase => write!(f, "Type III (Build & Hold, multi-case)"),
        }
    }
}

impl std::str::FromStr for WellType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "build_hold" | "type1" | "type_i" | "i" | "1" => Ok(WellType::BuildHold),
            "build_drop" | "s" | "type2" | "type_ii" | "ii" | "2" => Ok(WellType::BuildDrop),
            "multi_case" | "build_hold_multi_case" | "type3" | "type_iii" | "iii" | "3" => {
                Ok(WellType::MultiCase)
            }
            other => Err(format!(
                "unknown well profile '{other}' (expected build-hold, build-drop or multi-case)"
            )),
        }
    }
}

// ============================================================================
// Parameter Record
// ============================================================================

/// A named field of the parameter record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    KickoffTvd,
    TargetTvd,
    EndOfDropTvd,
    TargetDisplacement,
    BuildRate,
    DropRate,
    FinalInclination,
    SurfaceEast,
    SurfaceNorth,
    TargetEast,
    TargetNorth,
}

impl ParamField {
    pub const ALL: [ParamField; 11] = [
        ParamField::KickoffTvd,
        ParamField::TargetTvd,
        ParamField::EndOfDropTvd,
        ParamField::TargetDisplacement,
        ParamField::BuildRate,
        ParamField::DropRate,
        ParamField::FinalInclination,
        ParamField::SurfaceEast,
        ParamField::SurfaceNorth,
        ParamField::TargetEast,
        ParamField::TargetNorth,
    ];

    pub const COORDINATES: [ParamField; 4] = [
        ParamField::SurfaceEast,
        ParamField::SurfaceNorth,
        ParamField::TargetEast,
        ParamField::TargetNorth,
    ];

    /// Key used in plan files.
    pub fn key(&self) -> &'static str {
        match self {
            ParamField::KickoffTvd => "kickoff_tvd",
            ParamField::TargetTvd => "target_tvd",
            ParamField::EndOfDropTvd => "end_of_drop_tvd",
            ParamField::TargetDisplacement => "target_displacement",
            ParamField::BuildRate => "build_rate",
            ParamField::DropRate => "drop_rate",
            ParamField::FinalInclination => "final_inclination",
            ParamField::SurfaceEast => "surface_east",
            ParamField::SurfaceNorth => "surface_north",
            ParamField::TargetEast => "target_east",
            ParamField::TargetNorth => "target_north",
        }
    }

    /// Conventional drilling-engineering symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            ParamField::KickoffTvd => "V_B",
            ParamField::TargetTvd => "V_t",
            ParamField::EndOfDropTvd => "V_e",
            ParamField::TargetDisplacement => "H_t",
            ParamField::BuildRate => "BUR",
            ParamField::DropRate => "DOR",
            ParamField::FinalInclination => "α2",
            ParamField::SurfaceEast => "E_s",
            ParamField::SurfaceNorth => "N_s",
            ParamField::TargetEast => "E_t",
            ParamField::TargetNorth => "N_t",
        }
    }
}

impl std::fmt::Display for ParamField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.key(), self.symbol())
    }
}

/// Parameter record for a single solve.
///
/// Every field is optional; each solver decides which subset it needs.
/// Non-finite values are treated exactly like unset ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WellParameters {
    /// Vertical depth of the kickoff point (V_B)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kickoff_tvd: Option<f64>,

    /// True vertical depth of the target (V_t)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_tvd: Option<f64>,

    /// True vertical depth at the end of the drop section (V_e)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_drop_tvd: Option<f64>,

    /// Horizontal displacement of the target (H_t)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_displacement: Option<f64>,

    /// Build-up rate, °/100 length-units (BUR)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_rate: Option<f64>,

    /// Drop-off rate, °/100 length-units (DOR)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_rate: Option<f64>,

    /// Final inclination in degrees (α2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_inclination: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_east: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_north: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_east: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_north: Option<f64>,
}

impl WellParameters {
    /// Value of a field, or `None` when unset or non-numeric.
    pub fn get(&self, field: ParamField) -> Option<f64> {
        self.raw(field).filter(|v| v.is_finite())
    }

    /// Stored value of a field, NaN and infinities included.
    pub fn raw(&self, field: ParamField) -> Option<f64> {
        match field {
            ParamField::KickoffTvd => self.kickoff_tvd,
            ParamField::TargetTvd => self.target_tvd,
            ParamField::EndOfDropTvd => self.end_of_drop_tvd,
            ParamField::TargetDisplacement => self.target_displacement,
            ParamField::BuildRate => self.build_rate,
            ParamField::DropRate => self.drop_rate,
            ParamField::FinalInclination => self.final_inclination,
            ParamField::SurfaceEast => self.surface_east,
            ParamField::SurfaceNorth => self.surface_north,
            ParamField::TargetEast => self.target_east,
            ParamField::TargetNorth => self.target_north,
        }
    }

    pub fn is_set(&self, field: ParamField) -> bool {
        self.get(field).is_some()
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn overlay(&self, overrides: &WellParameters) -> WellParameters {
        WellParameters {
            kickoff_tvd: overrides.kickoff_tvd.or(self.kickoff_tvd),
            target_tvd: overrides.target_tvd.or(self.target_tvd),
            end_of_drop_tvd: overrides.end_of_drop_tvd.or(self.end_of_drop_tvd),
            target_displacement: overrides.target_displacement.or(self.target_displacement),
            build_rate: overrides.build_rate.or(self.build_rate),
            drop_rate: overrides.drop_rate.or(self.drop_rate),
            final_inclination: overrides.final_inclination.or(self.final_inclination),
            surface_east: overrides.surface_east.or(self.surface_east),
            surface_north: overrides.surface_north.or(self.surface_north),
            target_east: overrides.target_east.or(self.target_east),
            target_north: overrides.target_north.or(self.target_north),
        }
    }
}

// ============================================================================
// Solver Output
// ============================================================================

/// A named point along the well path.
///
/// `arc` describes the curved section that *starts* here, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Short name (A, B, C, ...)
    pub name: String,
    /// Long name, e.g. "Kickoff Point (KOP)"
    pub label: String,
    pub vertical: f64,
    pub horizontal: f64,
    pub measured_depth: f64,
    /// Hole inclination at this point, degrees
    pub inclination: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arc: Option<ArcDescriptor>,
}

impl Waypoint {
    pub fn new(
        name: &str,
        label: &str,
        position: PathPoint,
        measured_depth: f64,
        inclination: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            vertical: position.vertical,
            horizontal: position.horizontal,
            measured_depth,
            inclination,
            arc: None,
        }
    }

    /// The surface location (all zeros, vertical hole).
    pub fn surface() -> Self {
        Self::new("A", "Surface", PathPoint::default(), 0.0, 0.0)
    }

    pub fn with_arc(mut self, arc: ArcDescriptor) -> Self {
        self.arc = Some(arc);
        self
    }

    pub fn position(&self) -> PathPoint {
        PathPoint::new(self.vertical, self.horizontal)
    }
}

/// Type III input combination that was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiCase {
    /// Case 1: H_t and V_B known
    DisplacementKickoff,
    /// Case 2: H_t and BUR known
    DisplacementBuildRate,
    /// Case 3: H_t and α2 known
    DisplacementInclination,
    /// Case 4: V_B and α2 known
    KickoffInclination,
}

impl MultiCase {
    pub const ALL: [MultiCase; 4] = [
        MultiCase::DisplacementKickoff,
        MultiCase::DisplacementBuildRate,
        MultiCase::DisplacementInclination,
        MultiCase::KickoffInclination,
    ];

    pub fn number(&self) -> u8 {
        match self {
            MultiCase::DisplacementKickoff => 1,
            MultiCase::DisplacementBuildRate => 2,
            MultiCase::DisplacementInclination => 3,
            MultiCase::KickoffInclination => 4,
        }
    }

    /// Human-readable list of the known quantities.
    pub fn known(&self) -> &'static str {
        match self {
            MultiCase::DisplacementKickoff => "H_t + V_B",
            MultiCase::DisplacementBuildRate => "H_t + BUR",
            MultiCase::DisplacementInclination => "H_t + α2",
            MultiCase::KickoffInclination => "V_B + α2",
        }
    }
}

impl std::fmt::Display for MultiCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Case {} ({})", self.number(), self.known())
    }
}

/// Key derived quantities of a solve, for display and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionSummary {
    /// Build section radius of curvature
    pub build_radius: f64,
    /// Build-up rate, °/100 length-units (solved for Type III)
    pub build_rate: f64,
    /// Kickoff point vertical depth (solved for Type III cases 2 & 3)
    pub kickoff_tvd: f64,
    /// Inclination reached at the end of the build, degrees
    pub build_angle: f64,
    /// Inclination at the target, degrees
    pub final_inclination: f64,
    /// Horizontal displacement at the target
    pub target_displacement: f64,
    /// Auxiliary angle x of the Type I construction, degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_rate: Option<f64>,
    /// Length of the straight section between build and drop (Type II)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tangent_length: Option<f64>,
    /// Set when the Type II tangent radicand was negative and forced to zero
    #[serde(default)]
    pub tangent_clamped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<MultiCase>,
}

impl SolutionSummary {
    /// Summary fields shared by every profile; optional parts start empty.
    pub fn new(
        build_radius: f64,
        build_rate: f64,
        kickoff_tvd: f64,
        build_angle: f64,
        final_inclination: f64,
        target_displacement: f64,
    ) -> Self {
        Self {
            build_radius,
            build_rate,
            kickoff_tvd,
            build_angle,
            final_inclination,
            target_displacement,
            auxiliary_angle: None,
            drop_radius: None,
            drop_rate: None,
            tangent_length: None,
            tangent_clamped: false,
            case: None,
        }
    }
}

impl std::fmt::Display for SolutionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(case) = self.case {
            writeln!(f, "Solved from:        {case}")?;
        }
        writeln!(f, "Build radius (R):   {:.2}", self.build_radius)?;
        writeln!(f, "Build rate (BUR):   {:.3} °/100", self.build_rate)?;
        writeln!(f, "Kickoff TVD (V_B):  {:.2}", self.kickoff_tvd)?;
        if let Some(x) = self.auxiliary_angle {
            writeln!(f, "x angle:            {x:.2}°")?;
        }
        writeln!(f, "Build angle (α):    {:.2}°", self.build_angle)?;
        if let (Some(r2), Some(dor)) = (self.drop_radius, self.drop_rate) {
            writeln!(f, "Drop radius (R2):   {r2:.2}")?;
            writeln!(f, "Drop rate (DOR):    {dor:.3} °/100")?;
        }
        if let Some(cd) = self.tangent_length {
            let note = if self.tangent_clamped { " (clamped)" } else { "" };
            writeln!(f, "Tangent length:     {cd:.2}{note}")?;
        }
        writeln!(f, "Final inclination:  {:.2}°", self.final_inclination)?;
        write!(f, "Target displacement: {:.2}", self.target_displacement)
    }
}

/// Output of a solver: the ordered waypoint chain plus its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedTrajectory {
    pub well_type: WellType,
    pub waypoints: Vec<Waypoint>,
    pub summary: SolutionSummary,
}

impl SolvedTrajectory {
    pub fn waypoint(&self, name: &str) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.name == name)
    }

    /// Last waypoint of the chain.
    pub fn target(&self) -> Option<&Waypoint> {
        self.waypoints.last()
    }

    /// Measured depth at the target, 0 for an empty chain.
    pub fn total_measured_depth(&self) -> f64 {
        self.target().map_or(0.0, |w| w.measured_depth)
    }
}
