//! SVG map renderer
//!
//! Output is a pure function of the table and the shape list: no
//! timestamps, ids or float formatting, so identical cards render to
//! byte-identical documents.

use crate::application::ports::outbound::MapRendererPort;
use crate::domain::maps::{Shape, ShapeKind, OBJECTIVE_RADIUS_MM};
use crate::domain::value_objects::TableSize;

const RECT_STYLE: &str = r##"fill="rgba(100,150,250,0.3)" stroke="#4070c0" stroke-width="2""##;
const CIRCLE_STYLE: &str = r##"fill="rgba(128,128,128,0.2)" stroke="#666" stroke-width="2""##;
const POLYGON_STYLE: &str = r##"fill="rgba(250,100,100,0.3)" stroke="#c04040" stroke-width="2""##;
const OBJECTIVE_STYLE: &str = r#"fill="black" stroke="black""#;

/// Renders maps as standalone SVG documents in table millimeters
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgMapRenderer;

impl MapRendererPort for SvgMapRenderer {
    fn render(&self, table: &TableSize, shapes: &[Shape]) -> String {
        let (width, height) = (table.width_mm(), table.height_mm());
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        );
        for shape in shapes {
            svg.push_str(&shape_svg(shape));
        }
        svg.push_str("</svg>");
        svg
    }
}

fn shape_svg(shape: &Shape) -> String {
    let (tag, attrs) = match &shape.kind {
        ShapeKind::Rect {
            x,
            y,
            width,
            height,
        } => (
            "rect",
            format!(
                r#"x="{}" y="{}" width="{}" height="{}" {}"#,
                x, y, width, height, RECT_STYLE
            ),
        ),
        ShapeKind::Circle { cx, cy, r } => (
            "circle",
            format!(r#"cx="{}" cy="{}" r="{}" {}"#, cx, cy, r, CIRCLE_STYLE),
        ),
        ShapeKind::Polygon { points } => {
            let points = points
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            (
                "polygon",
                format!(r#"points="{}" {}"#, points, POLYGON_STYLE),
            )
        }
        ShapeKind::ObjectivePoint { cx, cy } => (
            "circle",
            format!(
                r#"cx="{}" cy="{}" r="{}" {}"#,
                cx, cy, OBJECTIVE_RADIUS_MM, OBJECTIVE_STYLE
            ),
        ),
    };

    match shape.description.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => format!(
            "<{tag} {attrs}><title>{title}</title></{tag}>",
            tag = tag,
            attrs = attrs,
            title = escape_text(text)
        ),
        _ => format!("<{} {} />", tag, attrs),
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
