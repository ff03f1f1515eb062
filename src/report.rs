//! Waypoint table and export formats.
//!
//! Values are rounded once, when the table is built, so the text, CSV and
//! JSON renderings of the same table always agree digit for digit.

use crate::config::defaults::{LENGTH_UNIT, REPORT_PRECISION};
use crate::types::{SolutionSummary, SolvedTrajectory, WellType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("trajectory has no waypoints")]
    Empty,
}

/// One formatted row: name plus fixed-precision position and depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointRow {
    pub name: String,
    pub label: String,
    pub vertical: String,
    pub horizontal: String,
    pub measured_depth: String,
    pub inclination: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointTable {
    pub precision: usize,
    pub length_unit: String,
    pub rows: Vec<WaypointRow>,
}

impl WaypointTable {
    /// Table at 3 decimals in feet.
    pub fn new(trajectory: &SolvedTrajectory) -> Self {
        Self::with_format(trajectory, REPORT_PRECISION, LENGTH_UNIT)
    }

    pub fn with_format(trajectory: &SolvedTrajectory, precision: usize, length_unit: &str) -> Self {
        let rows = trajectory
            .waypoints
            .iter()
            .map(|wp| WaypointRow {
                name: wp.name.clone(),
                label: wp.label.clone(),
                vertical: fixed(wp.vertical, precision),
                horizontal: fixed(wp.horizontal, precision),
                measured_depth: fixed(wp.measured_depth, precision),
                inclination: fixed(wp.inclination, precision),
            })
            .collect();

        Self {
            precision,
            length_unit: length_unit.to_string(),
            rows,
        }
    }

    /// Aligned plain-text table for the terminal.
    pub fn to_text(&self) -> String {
        let u = &self.length_unit;
        let headers = [
            "Point".to_string(),
            "Description".to_string(),
            format!("Vertical ({u})"),
            format!("Horizontal ({u})"),
            format!("MD ({u})"),
            "Inc (deg)".to_string(),
        ];
        let cells: Vec<[&str; 6]> = self
            .rows
            .iter()
            .map(|r| {
                [
                    r.name.as_str(),
                    r.label.as_str(),
                    r.vertical.as_str(),
                    r.horizontal.as_str(),
                    r.measured_depth.as_str(),
                    r.inclination.as_str(),
                ]
            })
            .collect();

        let mut widths = headers.clone().map(|h| h.chars().count());
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let header_line: Vec<String> = headers
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (h, w))| pad(h, w, i < 2))
            .collect();
        out.push_str(header_line.join("  ").trim_end());
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("  "));
        out.push('\n');

        for row in &cells {
            let line: Vec<String> = row
                .iter()
                .zip(widths)
                .enumerate()
                .map(|(i, (c, w))| pad(c, w, i < 2))
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
        }
        out
    }

    /// CSV with a header row. Labels are quoted.
    pub fn to_csv(&self) -> String {
        let u = &self.length_unit;
        let mut out = format!(
            "name,label,vertical_{u},horizontal_{u},measured_depth_{u},inclination_deg\n"
        );
        for r in &self.rows {
            out.push_str(&format!(
                "{},{},{},{},{},{}\n",
                r.name,
                csv_quote(&r.label),
                r.vertical,
                r.horizontal,
                r.measured_depth,
                r.inclination
            ));
        }
        out
    }
}

/// Full export: trajectory, summary and formatted table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryReport {
    pub well_name: String,
    pub well_type: WellType,
    pub generated_at: DateTime<Utc>,
    pub summary: SolutionSummary,
    pub table: WaypointTable,
    pub trajectory: SolvedTrajectory,
}

impl TrajectoryReport {
    pub fn new(
        well_name: &str,
        trajectory: &SolvedTrajectory,
        precision: usize,
        length_unit: &str,
    ) -> Result<Self, ReportError> {
        if trajectory.waypoints.is_empty() {
            return Err(ReportError::Empty);
        }
        Ok(Self {
            well_name: well_name.to_string(),
            well_type: trajectory.well_type,
            generated_at: Utc::now(),
            summary: trajectory.summary.clone(),
            table: WaypointTable::with_format(trajectory, precision, length_unit),
            trajectory: trajectory.clone(),
        })
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn fixed(value: f64, precision: usize) -> String {
    let s = format!("{value:.precision$}");
    // "-0.000" reads as a bug in a depth table
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

fn pad(text: &str, width: usize, left_align: bool) -> String {
    if left_align {
        format!("{text:<width$}")
    } else {
        format!("{text:>width$}")
    }
}

fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::solve;
    use crate::types::WellParameters;

    fn reference() -> SolvedTrajectory {
        let params = WellParameters {
            kickoff_tvd: Some(1000.0),
            target_tvd: Some(5000.0),
            target_displacement: Some(3000.0),
            build_rate: Some(2.0),
            ..Default::default()
        };
        solve(WellType::BuildHold, &params).unwrap()
    }

    #[test]
    fn test_rows_use_three_decimals() {
        let table = WaypointTable::new(&reference());
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0].vertical, "0.000");
        assert_eq!(table.rows[1].vertical, "1000.000");
        assert_eq!(table.rows[3].vertical, "5000.000");
        assert_eq!(table.rows[3].horizontal, "3000.000");
        assert_eq!(table.rows[2].measured_depth, "3382.193");
    }

    #[test]
    fn test_custom_precision() {
        let table = WaypointTable::with_format(&reference(), 1, "m");
        assert_eq!(table.rows[3].measured_depth, "6177.1");
        assert!(table.to_csv().starts_with("name,label,vertical_m,"));
    }

    #[test]
    fn test_negative_zero_suppressed() {
        assert_eq!(fixed(-0.0, 3), "0.000");
        assert_eq!(fixed(-1e-9, 2), "0.00");
        assert_eq!(fixed(-1.5, 1), "-1.5");
    }

    #[test]
    fn test_csv_rows() {
        let csv = WaypointTable::new(&reference()).to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("B,\"Kickoff Point (KOP)\",1000.000,0.000,1000.000,0.000"));
    }

    #[test]
    fn test_text_table_aligned() {
        let text = WaypointTable::new(&reference()).to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("Point"));
        assert!(lines[1].starts_with("-----"));
        assert!(lines[5].starts_with("T "));
        assert!(lines[5].contains("6177.058"));
    }

    #[test]
    fn test_json_report() {
        let report = TrajectoryReport::new("EXAMPLE-1", &reference(), 3, "ft").unwrap();
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["well_type"], "build_hold");
        assert_eq!(value["table"]["rows"][3]["name"], "T");
        assert_eq!(value["trajectory"]["waypoints"].as_array().unwrap().len(), 4);
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_empty_trajectory_rejected() {
        let mut t = reference();
        t.waypoints.clear();
        assert!(matches!(
            TrajectoryReport::new("x", &t, 3, "ft"),
            Err(ReportError::Empty)
        ));
    }
}
