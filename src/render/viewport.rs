//! Viewport projector: auto-fit a sampled path into a pixel canvas.
//!
//! Data space is (horizontal, vertical) with depth growing downward; device
//! space is (x, y) pixels with y growing downward, so depth maps straight
//! onto y without a flip. A single scale is used on both axes.

use super::sampler::SampledPath;
use crate::config::defaults::{DEGENERATE_AXIS_PADDING, MAX_TICK_COUNT, TICK_COUNT};
use crate::types::PathPoint;
use serde::{Deserialize, Serialize};

// ============================================================================
// Bounds
// ============================================================================

/// Bounding box accumulator over data-space points.
///
/// `x` is horizontal displacement, `y` is vertical depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    pub fn new() -> Self {
        Self {
            min_x: f64::MAX,
            max_x: f64::MIN,
            min_y: f64::MAX,
            max_y: f64::MIN,
        }
    }

    /// Bounds of a set of points; an empty set yields the origin.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a PathPoint>) -> Self {
        let mut bounds = Self::new();
        for p in points {
            bounds.update(p.horizontal, p.vertical);
        }
        if !bounds.is_valid() {
            bounds = Self::new();
            bounds.update(0.0, 0.0);
        }
        bounds
    }

    pub fn update(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Widen any zero-extent axis by `padding` on both sides.
    pub fn pad_degenerate(mut self, padding: f64) -> Self {
        if self.width() <= 0.0 {
            self.min_x -= padding;
            self.max_x += padding;
        }
        if self.height() <= 0.0 {
            self.min_y -= padding;
            self.max_y += padding;
        }
        self
    }
}

// ============================================================================
// Projection
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

/// A labelled tick: data value and its pixel coordinate along the axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub pixel: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedMarker {
    pub name: String,
    pub point: DevicePoint,
}

/// Result of one projection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub width: f64,
    pub height: f64,
    /// Data bounds after degenerate-axis padding
    pub bounds: Bounds,
    /// Pixels per data unit, identical on both axes
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub polyline: Vec<DevicePoint>,
    pub markers: Vec<ProjectedMarker>,
    /// Horizontal displacement ticks
    pub x_ticks: Vec<AxisTick>,
    /// Depth ticks
    pub y_ticks: Vec<AxisTick>,
}

impl Projection {
    pub fn to_device(&self, point: PathPoint) -> DevicePoint {
        DevicePoint {
            x: self.x_pixel(point.horizontal),
            y: self.y_pixel(point.vertical),
        }
    }

    fn x_pixel(&self, horizontal: f64) -> f64 {
        self.offset_x + (horizontal - self.bounds.min_x) * self.scale
    }

    fn y_pixel(&self, vertical: f64) -> f64 {
        self.offset_y + (vertical - self.bounds.min_y) * self.scale
    }
}

/// Project with the default tick count.
pub fn project(path: &SampledPath, width: f64, height: f64, margin: f64) -> Projection {
    project_with_ticks(path, width, height, margin, TICK_COUNT)
}

/// Fit `path` into a `width` × `height` canvas leaving `margin` free on
/// every side. The content is centred in the drawable area.
///
/// Never divides by zero: degenerate axes are padded and the drawable area
/// is at least one pixel in each direction. `tick_count` is clamped to
/// `2..=MAX_TICK_COUNT`.
pub fn project_with_ticks(
    path: &SampledPath,
    width: f64,
    height: f64,
    margin: f64,
    tick_count: usize,
) -> Projection {
    let bounds = Bounds::from_points(&path.points).pad_degenerate(DEGENERATE_AXIS_PADDING);

    let avail_w = (width - 2.0 * margin).max(1.0);
    let avail_h = (height - 2.0 * margin).max(1.0);
    let scale = (avail_w / bounds.width()).min(avail_h / bounds.height());

    let mut projection = Projection {
        width,
        height,
        bounds,
        scale,
        offset_x: margin + (avail_w - bounds.width() * scale) / 2.0,
        offset_y: margin + (avail_h - bounds.height() * scale) / 2.0,
        polyline: Vec::new(),
        markers: Vec::new(),
        x_ticks: Vec::new(),
        y_ticks: Vec::new(),
    };

    projection.polyline = path.points.iter().map(|p| projection.to_device(*p)).collect();
    projection.markers = path
        .markers
        .iter()
        .map(|m| ProjectedMarker {
            name: m.name.clone(),
            point: projection.to_device(m.position),
        })
        .collect();

    let n = tick_count.clamp(2, MAX_TICK_COUNT);
    projection.x_ticks = axis_ticks(bounds.min_x, bounds.max_x, n, |v| projection.x_pixel(v));
    projection.y_ticks = axis_ticks(bounds.min_y, bounds.max_y, n, |v| projection.y_pixel(v));
    projection
}

/// `n` evenly spaced ticks from `min` to `max` inclusive.
fn axis_ticks(min: f64, max: f64, n: usize, to_pixel: impl Fn(f64) -> f64) -> Vec<AxisTick> {
    let span = max - min;
    let step = span / (n - 1) as f64;
    (0..n)
        .map(|i| {
            let value = if i == n - 1 { max } else { min + step * i as f64 };
            AxisTick {
                value,
                pixel: to_pixel(value),
                label: tick_label(value, span),
            }
        })
        .collect()
}

fn tick_label(value: f64, span: f64) -> String {
    let decimals = if span >= 100.0 {
        0
    } else if span >= 1.0 {
        1
    } else {
        3
    };
    // avoid "-0"
    let value = if value.abs() < 0.5 * 10f64.powi(-decimals) { 0.0 } else { value };
    format!("{value:.prec$}", prec = decimals as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::sampler::PathMarker;
    use crate::types::WellType;

    fn path_of(points: &[(f64, f64)]) -> SampledPath {
        let points: Vec<PathPoint> = points.iter().map(|&(v, h)| PathPoint::new(v, h)).collect();
        SampledPath {
            well_type: WellType::BuildHold,
            markers: points
                .iter()
                .enumerate()
                .map(|(i, p)| PathMarker {
                    name: format!("P{i}"),
                    position: *p,
                })
                .collect(),
            points,
        }
    }

    #[test]
    fn test_bounds_accumulate() {
        let b = Bounds::from_points(&[PathPoint::new(10.0, -2.0), PathPoint::new(4.0, 6.0)]);
        assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (-2.0, 6.0, 4.0, 10.0));
    }

    #[test]
    fn test_bounds_empty_is_origin() {
        let b = Bounds::from_points(&[] as &[PathPoint]);
        assert!(b.is_valid());
        assert_eq!((b.width(), b.height()), (0.0, 0.0));
    }

    #[test]
    fn test_uniform_scale_uses_tighter_axis() {
        // 1000 wide, 4000 deep on an 800x600 canvas with 50 px margin
        let proj = project(&path_of(&[(0.0, 0.0), (4000.0, 1000.0)]), 800.0, 600.0, 50.0);
        assert!((proj.scale - 500.0 / 4000.0).abs() < 1e-12);

        // Depth fills the drawable height exactly
        assert!((proj.polyline[0].y - 50.0).abs() < 1e-9);
        assert!((proj.polyline[1].y - 550.0).abs() < 1e-9);
        // Width is centred: 125 px of content in 700 px
        assert!((proj.polyline[0].x - (50.0 + (700.0 - 125.0) / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_depth_grows_downward() {
        let proj = project(&path_of(&[(0.0, 0.0), (100.0, 0.0)]), 400.0, 400.0, 10.0);
        assert!(proj.polyline[1].y > proj.polyline[0].y);
    }

    #[test]
    fn test_single_point_is_padded() {
        let proj = project(&path_of(&[(1000.0, 0.0)]), 800.0, 600.0, 50.0);
        assert!(proj.scale.is_finite() && proj.scale > 0.0);
        assert_eq!(proj.bounds.width(), 2.0);
        assert_eq!(proj.bounds.height(), 2.0);
        assert_eq!(proj.x_ticks.len(), 5);
        assert_eq!(proj.y_ticks.len(), 5);
        assert!(proj.polyline[0].x.is_finite() && proj.polyline[0].y.is_finite());
        // The single point lands in the middle of the canvas
        assert!((proj.polyline[0].x - 400.0).abs() < 1e-9);
        assert!((proj.polyline[0].y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_ticks_span_range() {
        let proj = project(&path_of(&[(0.0, 0.0), (5000.0, 3000.0)]), 800.0, 600.0, 50.0);
        let values: Vec<f64> = proj.y_ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, [0.0, 1250.0, 2500.0, 3750.0, 5000.0]);
        assert_eq!(proj.y_ticks[2].label, "2500");
        assert!((proj.y_ticks[0].pixel - 50.0).abs() < 1e-9);
        assert!((proj.y_ticks[4].pixel - 550.0).abs() < 1e-9);
        assert_eq!(proj.x_ticks.last().unwrap().value, 3000.0);
    }

    #[test]
    fn test_tick_count_floor() {
        let proj = project_with_ticks(&path_of(&[(0.0, 0.0), (1.0, 1.0)]), 100.0, 100.0, 0.0, 0);
        assert_eq!(proj.x_ticks.len(), 2);
    }

    #[test]
    fn test_tick_count_ceiling() {
        let path = path_of(&[(0.0, 0.0), (1.0, 1.0)]);
        let proj = project_with_ticks(&path, 100.0, 100.0, 0.0, usize::MAX);
        assert_eq!(proj.x_ticks.len(), MAX_TICK_COUNT);
        assert_eq!(proj.y_ticks.len(), MAX_TICK_COUNT);
        assert_eq!(proj.y_ticks.last().unwrap().value, 1.0);
    }

    #[test]
    fn test_margin_larger_than_canvas_stays_finite() {
        let proj = project(&path_of(&[(0.0, 0.0), (10.0, 10.0)]), 50.0, 50.0, 100.0);
        assert!(proj.scale > 0.0 && proj.scale.is_finite());
    }

    #[test]
    fn test_tick_label_no_negative_zero() {
        assert_eq!(tick_label(-1e-12, 2.0), "0.0");
        assert_eq!(tick_label(-0.5, 2.0), "-0.5");
    }

    #[test]
    fn test_markers_projected() {
        let proj = project(&path_of(&[(0.0, 0.0), (10.0, 5.0)]), 200.0, 200.0, 0.0);
        assert_eq!(proj.markers.len(), 2);
        assert_eq!(proj.markers[1].point, proj.polyline[1]);
    }
}
