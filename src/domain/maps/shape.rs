//! Map shapes and their per-variant validators
//!
//! A shape arrives either from the generator (typed) or from a caller as raw
//! JSON. JSON input goes through [`Shape::from_json`], which dispatches on the
//! `type` discriminator to one parser per variant. Parsers insist on real
//! JSON integers, so `10.0` and `true` never pass as coordinates.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::TableSize;

/// Implicit radius of an objective marker, in millimeters
pub const OBJECTIVE_RADIUS_MM: i64 = 25;
pub const MIN_POLYGON_POINTS: usize = 3;
pub const MAX_POLYGON_POINTS: usize = 200;
/// Largest coordinate magnitude accepted from raw input (1 km)
pub const MAX_COORDINATE_MM: i64 = 1_000_000;

/// Integer point in table millimeters. The origin is the north-west corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Geometry of a shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    Circle { cx: i64, cy: i64, r: i64 },
    Rect { x: i64, y: i64, width: i64, height: i64 },
    Polygon { points: Vec<Point> },
    ObjectivePoint { cx: i64, cy: i64 },
}

impl ShapeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Rect { .. } => "rect",
            ShapeKind::Polygon { .. } => "polygon",
            ShapeKind::ObjectivePoint { .. } => "objective_point",
        }
    }
}

/// Table edge a border deployment zone is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Border {
    North,
    South,
    East,
    West,
}

impl std::fmt::Display for Border {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Border::North => write!(f, "north"),
            Border::South => write!(f, "south"),
            Border::East => write!(f, "east"),
            Border::West => write!(f, "west"),
        }
    }
}

impl std::str::FromStr for Border {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Border::North),
            "south" => Ok(Border::South),
            "east" => Ok(Border::East),
            "west" => Ok(Border::West),
            other => Err(DomainError::validation(format!("invalid border: {}", other))),
        }
    }
}

/// Table corner a corner deployment zone is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Corner {
    /// The table corner this anchor names
    pub fn point(&self, table: &TableSize) -> Point {
        let w = i64::from(table.width_mm());
        let h = i64::from(table.height_mm());
        match self {
            Corner::NorthWest => Point::new(0, 0),
            Corner::NorthEast => Point::new(w, 0),
            Corner::SouthWest => Point::new(0, h),
            Corner::SouthEast => Point::new(w, h),
        }
    }

    pub fn opposite(&self) -> Corner {
        match self {
            Corner::NorthEast => Corner::SouthWest,
            Corner::NorthWest => Corner::SouthEast,
            Corner::SouthEast => Corner::NorthWest,
            Corner::SouthWest => Corner::NorthEast,
        }
    }
}

impl std::fmt::Display for Corner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Corner::NorthEast => write!(f, "north-east"),
            Corner::NorthWest => write!(f, "north-west"),
            Corner::SouthEast => write!(f, "south-east"),
            Corner::SouthWest => write!(f, "south-west"),
        }
    }
}

impl std::str::FromStr for Corner {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north-east" => Ok(Corner::NorthEast),
            "north-west" => Ok(Corner::NorthWest),
            "south-east" => Ok(Corner::SouthEast),
            "south-west" => Ok(Corner::SouthWest),
            other => Err(DomainError::validation(format!("invalid corner: {}", other))),
        }
    }
}

/// Role a shape plays on the map, derived from its anchors and flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeCategory {
    Deployment,
    SolidScenography,
    PassableScenography,
    Objective,
}

/// A shape placed on the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shape {
    #[serde(flatten)]
    pub kind: ShapeKind,
    /// Exempts the shape from every collision check
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub allow_overlap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner: Option<Corner>,
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            allow_overlap: false,
            description: None,
            border: None,
            corner: None,
        }
    }

    pub fn circle(cx: i64, cy: i64, r: i64) -> Self {
        Self::new(ShapeKind::Circle { cx, cy, r })
    }

    pub fn rect(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self::new(ShapeKind::Rect { x, y, width, height })
    }

    pub fn polygon(points: Vec<Point>) -> Self {
        Self::new(ShapeKind::Polygon { points })
    }

    pub fn objective_point(cx: i64, cy: i64) -> Self {
        Self::new(ShapeKind::ObjectivePoint { cx, cy })
    }

    pub fn with_allow_overlap(mut self, allow_overlap: bool) -> Self {
        self.allow_overlap = allow_overlap;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_corner(mut self, corner: Corner) -> Self {
        self.corner = Some(corner);
        self
    }

    pub fn category(&self) -> ShapeCategory {
        if matches!(self.kind, ShapeKind::ObjectivePoint { .. }) {
            ShapeCategory::Objective
        } else if self.border.is_some() || self.corner.is_some() {
            ShapeCategory::Deployment
        } else if self.allow_overlap {
            ShapeCategory::PassableScenography
        } else {
            ShapeCategory::SolidScenography
        }
    }

    /// Table-independent checks: positive sizes and polygon point counts
    pub fn validate_geometry(&self) -> DomainResult<()> {
        match &self.kind {
            ShapeKind::Circle { r, .. } => {
                if *r <= 0 {
                    return Err(DomainError::validation("circle radius must be positive"));
                }
            }
            ShapeKind::Rect { width, height, .. } => {
                if *width <= 0 || *height <= 0 {
                    return Err(DomainError::validation("rect width/height must be positive"));
                }
            }
            ShapeKind::Polygon { points } => {
                if points.len() < MIN_POLYGON_POINTS {
                    return Err(DomainError::validation("polygon requires at least 3 points"));
                }
                if points.len() > MAX_POLYGON_POINTS {
                    return Err(DomainError::validation("polygon has too many points"));
                }
            }
            ShapeKind::ObjectivePoint { .. } => {}
        }
        Ok(())
    }

    /// Whether the full extent lies within the table. Objective markers only
    /// need their center inside; the marker radius may hang over the edge.
    pub fn is_within(&self, table: &TableSize) -> bool {
        let w = i64::from(table.width_mm());
        let h = i64::from(table.height_mm());
        let inside = |x: i64, y: i64| (0..=w).contains(&x) && (0..=h).contains(&y);
        match &self.kind {
            ShapeKind::Circle { cx, cy, r } => {
                let fits = |c: i64, limit: i64| {
                    c.checked_sub(*r).is_some_and(|lo| lo >= 0)
                        && c.checked_add(*r).is_some_and(|hi| hi <= limit)
                };
                fits(*cx, w) && fits(*cy, h)
            }
            ShapeKind::Rect { x, y, width, height } => {
                *x >= 0
                    && *y >= 0
                    && x.checked_add(*width).is_some_and(|right| right <= w)
                    && y.checked_add(*height).is_some_and(|bottom| bottom <= h)
            }
            ShapeKind::Polygon { points } => points.iter().all(|p| inside(p.x, p.y)),
            ShapeKind::ObjectivePoint { cx, cy } => inside(*cx, *cy),
        }
    }

    /// Parse a raw JSON shape, dispatching on its `type` field
    pub fn from_json(value: &Value) -> DomainResult<Shape> {
        let obj = value
            .as_object()
            .ok_or_else(|| DomainError::validation("shape must be an object"))?;
        let shape_type = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| DomainError::validation("shape type must be string"))?;

        let kind = match shape_type {
            "circle" => parse_circle(obj)?,
            "rect" => parse_rect(obj)?,
            "polygon" => parse_polygon(obj)?,
            "objective_point" => parse_objective_point(obj)?,
            other => {
                return Err(DomainError::validation(format!("unknown shape type: {}", other)))
            }
        };

        let shape = Shape {
            kind,
            allow_overlap: optional_bool(obj, "allow_overlap")?,
            description: optional_str(obj, "description")?,
            border: optional_str(obj, "border")?.map(|s| s.parse()).transpose()?,
            corner: optional_str(obj, "corner")?.map(|s| s.parse()).transpose()?,
        };
        shape.validate_geometry()?;
        Ok(shape)
    }
}

// ============================================================================
// Per-variant parsers
// ============================================================================

fn parse_circle(obj: &Map<String, Value>) -> DomainResult<ShapeKind> {
    if !has_all(obj, &["cx", "cy", "r"]) {
        return Err(DomainError::validation("circle requires cx, cy, r"));
    }
    Ok(ShapeKind::Circle {
        cx: require_int(obj, "cx")?,
        cy: require_int(obj, "cy")?,
        r: require_int(obj, "r")?,
    })
}

fn parse_rect(obj: &Map<String, Value>) -> DomainResult<ShapeKind> {
    if !has_all(obj, &["x", "y", "width", "height"]) {
        return Err(DomainError::validation("rect requires x, y, width, height"));
    }
    Ok(ShapeKind::Rect {
        x: require_int(obj, "x")?,
        y: require_int(obj, "y")?,
        width: require_int(obj, "width")?,
        height: require_int(obj, "height")?,
    })
}

fn parse_polygon(obj: &Map<String, Value>) -> DomainResult<ShapeKind> {
    let points = match obj.get("points") {
        None | Some(Value::Null) => return Err(DomainError::validation("polygon requires points")),
        Some(Value::Array(points)) => points,
        Some(_) => return Err(DomainError::validation("polygon points must be list")),
    };
    if points.len() > MAX_POLYGON_POINTS {
        return Err(DomainError::validation("polygon has too many points"));
    }
    let points = points
        .iter()
        .map(|point| {
            let point = point
                .as_object()
                .ok_or_else(|| DomainError::validation("polygon point must be object"))?;
            if !has_all(point, &["x", "y"]) {
                return Err(DomainError::validation("polygon point requires x and y"));
            }
            Ok(Point::new(require_int(point, "x")?, require_int(point, "y")?))
        })
        .collect::<DomainResult<Vec<_>>>()?;
    Ok(ShapeKind::Polygon { points })
}

fn parse_objective_point(obj: &Map<String, Value>) -> DomainResult<ShapeKind> {
    if !has_all(obj, &["cx", "cy"]) {
        return Err(DomainError::validation("objective_point requires cx, cy"));
    }
    Ok(ShapeKind::ObjectivePoint {
        cx: require_int(obj, "cx")?,
        cy: require_int(obj, "cy")?,
    })
}

fn has_all(obj: &Map<String, Value>, fields: &[&str]) -> bool {
    fields.iter().all(|field| obj.contains_key(*field))
}

/// Accepts JSON integers only. Floats and booleans are rejected.
fn require_int(obj: &Map<String, Value>, field: &str) -> DomainResult<i64> {
    let value = obj
        .get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| DomainError::validation(format!("{} must be int", field)))?;
    if !(-MAX_COORDINATE_MM..=MAX_COORDINATE_MM).contains(&value) {
        return Err(DomainError::validation(format!("{} out of range", field)));
    }
    Ok(value)
}

fn optional_bool(obj: &Map<String, Value>, field: &str) -> DomainResult<bool> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(DomainError::validation(format!("{} must be bool", field))),
    }
}

fn optional_str(obj: &Map<String, Value>, field: &str) -> DomainResult<Option<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DomainError::validation(format!("{} must be string", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn err(value: Value) -> String {
        match Shape::from_json(&value).unwrap_err() {
            DomainError::Validation(msg) => msg,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_each_variant() {
        let circle = Shape::from_json(&json!({"type": "circle", "cx": 100, "cy": 100, "r": 50})).unwrap();
        assert_eq!(circle.kind, ShapeKind::Circle { cx: 100, cy: 100, r: 50 });
        assert_eq!(circle.category(), ShapeCategory::SolidScenography);

        let rect = Shape::from_json(&json!({
            "type": "rect", "x": 0, "y": 0, "width": 1200, "height": 200,
            "border": "north", "description": "Vanguard deployment"
        }))
        .unwrap();
        assert_eq!(rect.border, Some(Border::North));
        assert_eq!(rect.category(), ShapeCategory::Deployment);

        let polygon = Shape::from_json(&json!({
            "type": "polygon",
            "points": [{"x": 0, "y": 0}, {"x": 100, "y": 0}, {"x": 0, "y": 100}],
            "corner": "north-west"
        }))
        .unwrap();
        assert_eq!(polygon.corner, Some(Corner::NorthWest));

        let objective = Shape::from_json(&json!({"type": "objective_point", "cx": 5, "cy": 5})).unwrap();
        assert_eq!(objective.category(), ShapeCategory::Objective);

        let passable = Shape::from_json(&json!({
            "type": "circle", "cx": 100, "cy": 100, "r": 50, "allow_overlap": true
        }))
        .unwrap();
        assert_eq!(passable.category(), ShapeCategory::PassableScenography);
    }

    #[test]
    fn test_rejects_non_integer_fields() {
        assert_eq!(err(json!({"type": "circle", "cx": 10.0, "cy": 1, "r": 1})), "cx must be int");
        assert_eq!(err(json!({"type": "circle", "cx": true, "cy": 1, "r": 1})), "cx must be int");
        assert_eq!(err(json!({"type": "rect", "x": "0", "y": 0, "width": 1, "height": 1})), "x must be int");
        assert_eq!(
            err(json!({"type": "polygon", "points": [{"x": 0, "y": 0}, {"x": 1.5, "y": 0}, {"x": 0, "y": 1}]})),
            "x must be int"
        );
    }

    #[test]
    fn test_rejects_missing_fields_and_bad_types() {
        assert_eq!(err(json!({"type": "circle", "cx": 1, "cy": 1})), "circle requires cx, cy, r");
        assert_eq!(err(json!({"type": "rect", "x": 1})), "rect requires x, y, width, height");
        assert_eq!(err(json!({"type": "hexagon"})), "unknown shape type: hexagon");
        assert_eq!(err(json!({"cx": 1})), "shape type must be string");
        assert_eq!(err(json!("circle")), "shape must be an object");
        assert_eq!(err(json!({"type": "polygon"})), "polygon requires points");
        assert_eq!(err(json!({"type": "polygon", "points": "0,0"})), "polygon points must be list");
        assert_eq!(
            err(json!({"type": "circle", "cx": 1, "cy": 1, "r": 1, "allow_overlap": "yes"})),
            "allow_overlap must be bool"
        );
        assert_eq!(
            err(json!({"type": "rect", "x": 0, "y": 0, "width": 1, "height": 1, "border": "up"})),
            "invalid border: up"
        );
    }

    #[test]
    fn test_positivity_and_point_counts() {
        assert_eq!(err(json!({"type": "circle", "cx": 1, "cy": 1, "r": 0})), "circle radius must be positive");
        assert_eq!(
            err(json!({"type": "rect", "x": 0, "y": 0, "width": 10, "height": -1})),
            "rect width/height must be positive"
        );
        assert_eq!(
            err(json!({"type": "polygon", "points": [{"x": 0, "y": 0}, {"x": 1, "y": 1}]})),
            "polygon requires at least 3 points"
        );
        let many: Vec<Value> = (0..201).map(|i| json!({"x": i, "y": 0})).collect();
        assert_eq!(err(json!({"type": "polygon", "points": many})), "polygon has too many points");
    }

    #[test]
    fn test_bounds() {
        let table = TableSize::standard();
        assert!(Shape::circle(50, 50, 50).is_within(&table));
        assert!(!Shape::circle(49, 50, 50).is_within(&table));
        assert!(Shape::rect(0, 0, 1200, 1200).is_within(&table));
        assert!(!Shape::rect(1, 0, 1200, 1200).is_within(&table));
        assert!(!Shape::polygon(vec![Point::new(0, 0), Point::new(1201, 0), Point::new(0, 5)]).is_within(&table));
        // The marker radius may hang over the edge
        assert!(Shape::objective_point(0, 1200).is_within(&table));
        assert!(!Shape::objective_point(-1, 10).is_within(&table));
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let value = serde_json::to_value(
            Shape::rect(0, 0, 10, 20).with_border(Border::West).with_description("Staging ground"),
        )
        .unwrap();
        assert_eq!(
            value,
            json!({"type": "rect", "x": 0, "y": 0, "width": 10, "height": 20,
                   "border": "west", "description": "Staging ground"})
        );
        let parsed = Shape::from_json(&value).unwrap();
        assert_eq!(parsed.border, Some(Border::West));
    }
}
