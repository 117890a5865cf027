//! Pairwise overlap tests with a clearance margin
//!
//! Rect and circle pairs use exact integer arithmetic. Any pair involving a
//! polygon goes through `geo`: the pair overlaps when the shapes intersect
//! or lie closer than the clearance (circles and objective markers add
//! their radius to that distance).

use geo::{Coord, EuclideanDistance, Intersects, LineString, Polygon, Rect};

use super::shape::{Point, Shape, ShapeKind, OBJECTIVE_RADIUS_MM};

/// Default gap required between two non-exempt shapes
pub const MIN_CLEARANCE_MM: i64 = 10;

/// Normalized geometry used by the pairwise tests
enum Primitive<'a> {
    Rect { x: i64, y: i64, w: i64, h: i64 },
    Circle { cx: i64, cy: i64, r: i64 },
    Polygon(&'a [Point]),
}

fn primitive(shape: &Shape) -> Primitive<'_> {
    match &shape.kind {
        ShapeKind::Rect { x, y, width, height } => Primitive::Rect { x: *x, y: *y, w: *width, h: *height },
        ShapeKind::Circle { cx, cy, r } => Primitive::Circle { cx: *cx, cy: *cy, r: *r },
        ShapeKind::ObjectivePoint { cx, cy } => Primitive::Circle { cx: *cx, cy: *cy, r: OBJECTIVE_RADIUS_MM },
        ShapeKind::Polygon { points } => Primitive::Polygon(points),
    }
}

/// Whether two shapes come closer than `clearance_mm`.
///
/// A pair where either shape sets `allow_overlap` never overlaps.
pub fn shapes_overlap(a: &Shape, b: &Shape, clearance_mm: i64) -> bool {
    if a.allow_overlap || b.allow_overlap {
        return false;
    }
    primitives_overlap(&primitive(a), &primitive(b), clearance_mm)
}

/// First overlapping pair `(i, j)` with `i < j`, in index order
pub fn find_first_collision(shapes: &[Shape], clearance_mm: i64) -> Option<(usize, usize)> {
    for i in 0..shapes.len() {
        for j in (i + 1)..shapes.len() {
            if shapes_overlap(&shapes[i], &shapes[j], clearance_mm) {
                return Some((i, j));
            }
        }
    }
    None
}

fn primitives_overlap(a: &Primitive<'_>, b: &Primitive<'_>, c: i64) -> bool {
    match (a, b) {
        (
            Primitive::Rect { x: ax, y: ay, w: aw, h: ah },
            Primitive::Rect { x: bx, y: by, w: bw, h: bh },
        ) => rects_overlap((*ax, *ay, *aw, *ah), (*bx, *by, *bw, *bh), c),
        (
            Primitive::Circle { cx: ax, cy: ay, r: ar },
            Primitive::Circle { cx: bx, cy: by, r: br },
        ) => circles_overlap((*ax, *ay, *ar), (*bx, *by, *br), c),
        (Primitive::Rect { x, y, w, h }, Primitive::Circle { cx, cy, r })
        | (Primitive::Circle { cx, cy, r }, Primitive::Rect { x, y, w, h }) => {
            rect_circle_overlap((*x, *y, *w, *h), (*cx, *cy, *r), c)
        }
        (Primitive::Polygon(points), other) | (other, Primitive::Polygon(points)) => {
            polygon_overlap(points, other, c)
        }
    }
}

/// Axis-aligned separation test with each rect expanded by the clearance
fn rects_overlap(a: (i64, i64, i64, i64), b: (i64, i64, i64, i64), c: i64) -> bool {
    let (ax, ay, aw, ah) = a;
    let (bx, by, bw, bh) = b;
    let separated_x = ax.saturating_add(aw).saturating_add(c) <= bx
        || bx.saturating_add(bw).saturating_add(c) <= ax;
    let separated_y = ay.saturating_add(ah).saturating_add(c) <= by
        || by.saturating_add(bh).saturating_add(c) <= ay;
    !(separated_x || separated_y)
}

fn circles_overlap(a: (i64, i64, i64), b: (i64, i64, i64), c: i64) -> bool {
    let dx = i128::from(a.0) - i128::from(b.0);
    let dy = i128::from(a.1) - i128::from(b.1);
    let reach = i128::from(a.2) + i128::from(b.2) + i128::from(c);
    closer_than(dx, dy, reach)
}

/// Closest point on the rect to the circle center, compared against `r + c`
fn rect_circle_overlap(rect: (i64, i64, i64, i64), circle: (i64, i64, i64), c: i64) -> bool {
    let (x, y, w, h) = rect;
    let (cx, cy, r) = circle;
    let nearest_x = cx.clamp(x, x.saturating_add(w.max(0)));
    let nearest_y = cy.clamp(y, y.saturating_add(h.max(0)));
    let dx = i128::from(cx) - i128::from(nearest_x);
    let dy = i128::from(cy) - i128::from(nearest_y);
    let reach = i128::from(r) + i128::from(c);
    closer_than(dx, dy, reach)
}

/// Squared-distance comparison, falling back to floats when the squares
/// leave the i128 range
fn closer_than(dx: i128, dy: i128, reach: i128) -> bool {
    let squared = dx
        .checked_mul(dx)
        .zip(dy.checked_mul(dy))
        .and_then(|(x2, y2)| x2.checked_add(y2));
    match (squared, reach.checked_mul(reach)) {
        (Some(distance), Some(limit)) => distance < limit,
        _ => (dx as f64).hypot(dy as f64) < reach as f64,
    }
}

fn polygon_overlap(points: &[Point], other: &Primitive<'_>, c: i64) -> bool {
    let polygon = to_geo_polygon(points);
    let clearance = c as f64;
    match other {
        Primitive::Polygon(other_points) => {
            let other = to_geo_polygon(other_points);
            polygon.intersects(&other) || polygon.euclidean_distance(&other) < clearance
        }
        Primitive::Rect { x, y, w, h } => {
            let rect = Rect::new(
                Coord { x: *x as f64, y: *y as f64 },
                Coord { x: x.saturating_add(*w) as f64, y: y.saturating_add(*h) as f64 },
            )
            .to_polygon();
            polygon.intersects(&rect) || polygon.euclidean_distance(&rect) < clearance
        }
        Primitive::Circle { cx, cy, r } => {
            let center = geo::Point::new(*cx as f64, *cy as f64);
            polygon.intersects(&center) || center.euclidean_distance(&polygon) < r.saturating_add(c) as f64
        }
    }
}

fn to_geo_polygon(points: &[Point]) -> Polygon<f64> {
    let ring: Vec<Coord<f64>> = points
        .iter()
        .map(|p| Coord { x: p.x as f64, y: p.y as f64 })
        .collect();
    Polygon::new(LineString::from(ring), vec![])
}
