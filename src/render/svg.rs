//! SVG chart for a projected well path.
//!
//! Depth axis on the left, displacement axis along the top (the surface),
//! the sampled polyline, and a labelled dot per waypoint.

use super::viewport::Projection;

const PATH_COLOR: &str = "#1f77b4";
const MARKER_COLOR: &str = "#d62728";
const AXIS_COLOR: &str = "#444";
const GRID_COLOR: &str = "#e5e5e5";

/// Render a projection as a standalone SVG document.
pub fn render_svg(projection: &Projection, title: &str, length_unit: &str) -> String {
    let w = projection.width;
    let h = projection.height;
    let left = projection.offset_x;
    let top = projection.offset_y;
    let right = left + projection.bounds.width() * projection.scale;
    let bottom = top + projection.bounds.height() * projection.scale;

    let mut grid = String::new();
    let mut labels = String::new();
    for tick in &projection.x_ticks {
        grid.push_str(&format!(
            r#"<line x1="{x:.2}" y1="{top:.2}" x2="{x:.2}" y2="{bottom:.2}" stroke="{GRID_COLOR}" stroke-width="1"/>"#,
            x = tick.pixel
        ));
        labels.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="middle" fill="{AXIS_COLOR}">{}</text>"#,
            tick.pixel,
            top - 8.0,
            tick.label
        ));
    }
    for tick in &projection.y_ticks {
        grid.push_str(&format!(
            r#"<line x1="{left:.2}" y1="{y:.2}" x2="{right:.2}" y2="{y:.2}" stroke="{GRID_COLOR}" stroke-width="1"/>"#,
            y = tick.pixel
        ));
        labels.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="end" fill="{AXIS_COLOR}">{}</text>"#,
            left - 6.0,
            tick.pixel + 4.0,
            tick.label
        ));
    }

    let mut points = String::new();
    for (i, p) in projection.polyline.iter().enumerate() {
        if i > 0 {
            points.push(' ');
        }
        points.push_str(&format!("{:.2},{:.2}", p.x, p.y));
    }

    let mut markers = String::new();
    for m in &projection.markers {
        markers.push_str(&format!(
            r#"<circle cx="{x:.2}" cy="{y:.2}" r="4" fill="{MARKER_COLOR}"/><text x="{lx:.2}" y="{ly:.2}" font-size="12" fill="{MARKER_COLOR}">{name}</text>"#,
            x = m.point.x,
            y = m.point.y,
            lx = m.point.x + 6.0,
            ly = m.point.y - 6.0,
            name = escape(&m.name)
        ));
    }

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" style="background:white">
<title>{title}</title>
<g class="grid">{grid}</g>
<rect x="{left:.2}" y="{top:.2}" width="{bw:.2}" height="{bh:.2}" fill="none" stroke="{AXIS_COLOR}" stroke-width="1"/>
<g class="labels">{labels}</g>
<text x="{cx:.2}" y="{ty:.2}" font-size="12" text-anchor="middle" fill="{AXIS_COLOR}">Horizontal displacement ({unit})</text>
<text x="12" y="{cy:.2}" font-size="12" text-anchor="middle" fill="{AXIS_COLOR}" transform="rotate(-90 12 {cy:.2})">Vertical depth ({unit})</text>
<polyline points="{points}" fill="none" stroke="{PATH_COLOR}" stroke-width="2"/>
<g class="waypoints">{markers}</g>
</svg>
"##,
        title = escape(title),
        bw = right - left,
        bh = bottom - top,
        cx = (left + right) / 2.0,
        ty = (top - 24.0).max(12.0),
        cy = (top + bottom) / 2.0,
        unit = escape(length_unit),
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{project, sample};
    use crate::trajectory::solve;
    use crate::types::{WellParameters, WellType};

    fn projected() -> Projection {
        let params = WellParameters {
            kickoff_tvd: Some(1000.0),
            target_tvd: Some(5000.0),
            target_displacement: Some(3000.0),
            build_rate: Some(2.0),
            ..Default::default()
        };
        let t = solve(WellType::BuildHold, &params).unwrap();
        project(&sample(&t), 800.0, 600.0, 50.0)
    }

    #[test]
    fn test_svg_structure() {
        let svg = render_svg(&projected(), "EXAMPLE-1", "ft");
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(svg.contains(">T</text>"));
        assert!(svg.contains("Vertical depth (ft)"));
    }

    #[test]
    fn test_svg_has_tick_labels() {
        let proj = projected();
        let svg = render_svg(&proj, "x", "ft");
        for tick in proj.x_ticks.iter().chain(&proj.y_ticks) {
            assert!(svg.contains(&format!(">{}</text>", tick.label)), "missing {}", tick.label);
        }
    }

    #[test]
    fn test_title_is_escaped() {
        let svg = render_svg(&projected(), "A&B <well>", "ft");
        assert!(svg.contains("<title>A&amp;B &lt;well&gt;</title>"));
    }
}
