//! Render Integration Tests
//!
//! Solve → sample → project → SVG through the public API. Checks the
//! projector's fitting guarantees on real trajectories and that repeated
//! redraws are identical.

use wellpath::render::{project, project_with_ticks, render_svg, sample, SampledPath};
use wellpath::trajectory::solve;
use wellpath::types::{PathPoint, WellParameters, WellType};

fn s_well() -> wellpath::SolvedTrajectory {
    let params = WellParameters {
        kickoff_tvd: Some(1000.0),
        target_tvd: Some(9000.0),
        end_of_drop_tvd: Some(8000.0),
        target_displacement: Some(3000.0),
        build_rate: Some(2.0),
        drop_rate: Some(1.5),
        final_inclination: Some(10.0),
        ..Default::default()
    };
    solve(WellType::BuildDrop, &params).expect("S-well solves")
}

#[test]
fn sample_then_project_is_idempotent() {
    let t = s_well();
    let first = project(&sample(&t), 800.0, 600.0, 50.0);
    let second = project(&sample(&t), 800.0, 600.0, 50.0);
    assert_eq!(first, second);
}

#[test]
fn projected_path_stays_inside_margins() {
    let t = s_well();
    let (w, h, m) = (1024.0, 768.0, 40.0);
    let proj = project(&sample(&t), w, h, m);

    for p in &proj.polyline {
        assert!(p.x >= m - 1e-9 && p.x <= w - m + 1e-9, "x {} outside", p.x);
        assert!(p.y >= m - 1e-9 && p.y <= h - m + 1e-9, "y {} outside", p.y);
    }

    // Deep well: depth is the binding axis and fills the drawable height
    let ys: Vec<f64> = proj.polyline.iter().map(|p| p.y).collect();
    let min_y = ys.iter().copied().fold(f64::INFINITY, f64::min);
    let max_y = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert!((min_y - m).abs() < 1e-9);
    assert!((max_y - (h - m)).abs() < 1e-9);
}

#[test]
fn projection_preserves_aspect_ratio() {
    let t = s_well();
    let path = sample(&t);
    let proj = project(&path, 640.0, 480.0, 20.0);

    let a = proj.polyline[0];
    let b = *proj.polyline.last().unwrap();
    let pa = path.points[0];
    let pb = *path.points.last().unwrap();

    let sx = (b.x - a.x) / (pb.horizontal - pa.horizontal);
    let sy = (b.y - a.y) / (pb.vertical - pa.vertical);
    assert!((sx - sy).abs() < 1e-9, "x scale {sx} vs y scale {sy}");
    assert!((sx - proj.scale).abs() < 1e-9);
}

#[test]
fn single_point_path_projects_without_dividing_by_zero() {
    let path = SampledPath {
        well_type: WellType::BuildHold,
        points: vec![PathPoint::new(0.0, 0.0)],
        markers: Vec::new(),
    };
    let proj = project(&path, 800.0, 600.0, 50.0);

    assert!(proj.scale.is_finite() && proj.scale > 0.0);
    assert_eq!(proj.x_ticks.len(), 5);
    assert_eq!(proj.y_ticks.len(), 5);
    for tick in proj.x_ticks.iter().chain(&proj.y_ticks) {
        assert!(tick.pixel.is_finite());
    }
    assert_eq!(proj.x_ticks[0].value, -1.0);
    assert_eq!(proj.x_ticks[4].value, 1.0);
}

#[test]
fn empty_path_projects_around_origin() {
    let path = SampledPath {
        well_type: WellType::BuildHold,
        points: Vec::new(),
        markers: Vec::new(),
    };
    let proj = project(&path, 300.0, 300.0, 10.0);
    assert!(proj.polyline.is_empty());
    assert!(proj.scale.is_finite());
    assert_eq!(proj.y_ticks.first().map(|t| t.value), Some(-1.0));
}

#[test]
fn vertical_well_pads_horizontal_axis() {
    let params = WellParameters {
        kickoff_tvd: Some(1000.0),
        target_tvd: Some(5000.0),
        target_displacement: Some(0.0),
        build_rate: Some(2.0),
        ..Default::default()
    };
    let t = solve(WellType::BuildHold, &params).unwrap();
    let proj = project(&sample(&t), 800.0, 600.0, 50.0);
    assert!(proj.bounds.width() > 0.0);
    assert!(proj.scale.is_finite());
}

#[test]
fn tick_count_is_configurable() {
    let proj = project_with_ticks(&sample(&s_well()), 800.0, 600.0, 50.0, 11);
    assert_eq!(proj.y_ticks.len(), 11);
    let values: Vec<f64> = proj.y_ticks.iter().map(|t| t.value).collect();
    assert!(values.windows(2).all(|w| w[1] > w[0]));
    assert_eq!(values[0], 0.0);
    assert!((values[10] - 9000.0).abs() < 1e-6);
}

#[test]
fn svg_chart_for_s_well() {
    let t = s_well();
    let proj = project(&sample(&t), 800.0, 600.0, 50.0);
    let svg = render_svg(&proj, "S-1", "ft");

    assert!(svg.contains(r#"width="800""#));
    assert_eq!(svg.matches("<circle").count(), 6);
    for name in ["A", "B", "C", "D", "E", "T"] {
        assert!(svg.contains(&format!(">{name}</text>")), "marker {name} missing");
    }
}
