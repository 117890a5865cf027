//! MapSpec - the validated shape layout of one table
//!
//! Construction runs a single fail-fast pass: count limits, deployment
//! anchoring and bounds are checked shape by shape, then collisions are
//! checked over the relevant subsets. A `MapSpec` that exists is valid.

use serde::Serialize;
use serde_json::Value;

use super::collision::{find_first_collision, shapes_overlap, MIN_CLEARANCE_MM};
use super::shape::{Border, Shape, ShapeCategory, ShapeKind};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::TableSize;

pub const MAX_SHAPES: usize = 100;
pub const MAX_DEPLOYMENT_SHAPES: usize = 4;
pub const MAX_SCENOGRAPHY_SHAPES: usize = 6;
pub const MAX_SOLID_SCENOGRAPHY: usize = 3;
pub const MAX_PASSABLE_SCENOGRAPHY: usize = 3;
pub const MAX_OBJECTIVE_POINTS: usize = 10;

/// Validated layout: deployment and scenography shapes plus objective markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapSpec {
    table: TableSize,
    shapes: Vec<Shape>,
    objective_shapes: Vec<Shape>,
}

impl MapSpec {
    /// Validate typed shapes against a table
    pub fn new(table: TableSize, shapes: Vec<Shape>, objective_shapes: Vec<Shape>) -> DomainResult<Self> {
        validate_layout(&table, &shapes, &objective_shapes)?;
        Ok(Self {
            table,
            shapes,
            objective_shapes,
        })
    }

    /// Validate raw JSON shape lists.
    ///
    /// `shapes` must be an explicit array (possibly empty). `objective_shapes`
    /// may be absent or `null`, meaning no objectives.
    pub fn from_json(table: TableSize, shapes: &Value, objective_shapes: Option<&Value>) -> DomainResult<Self> {
        let shapes = match shapes {
            Value::Null => return Err(DomainError::validation("shapes cannot be null")),
            Value::Array(items) => items,
            _ => return Err(DomainError::validation("shapes must be a list")),
        };
        if shapes.len() > MAX_SHAPES {
            return Err(DomainError::validation("too many shapes"));
        }
        let shapes = shapes.iter().map(Shape::from_json).collect::<DomainResult<Vec<_>>>()?;
        let objective_shapes = parse_objective_shapes(objective_shapes)?;

        Self::new(table, shapes, objective_shapes)
    }

    /// The same terrain with its objective markers replaced from raw JSON
    pub fn with_objective_shapes(&self, objective_shapes: Option<&Value>) -> DomainResult<Self> {
        let objective_shapes = parse_objective_shapes(objective_shapes)?;
        Self::new(self.table, self.shapes.clone(), objective_shapes)
    }

    pub fn table(&self) -> &TableSize {
        &self.table
    }

    /// Deployment and scenography shapes
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn objective_shapes(&self) -> &[Shape] {
        &self.objective_shapes
    }

    pub fn deployment_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(|s| s.category() == ShapeCategory::Deployment)
    }

    pub fn scenography_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| {
            matches!(
                s.category(),
                ShapeCategory::SolidScenography | ShapeCategory::PassableScenography
            )
        })
    }

    /// Every shape in draw order: terrain first, objectives on top
    pub fn all_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().chain(self.objective_shapes.iter())
    }
}

fn parse_objective_shapes(objective_shapes: Option<&Value>) -> DomainResult<Vec<Shape>> {
    match objective_shapes {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => {
            if items.len() > MAX_OBJECTIVE_POINTS {
                return Err(DomainError::validation("too many objective points (max 10)"));
            }
            items.iter().map(Shape::from_json).collect()
        }
        Some(_) => Err(DomainError::validation("objective_shapes must be a list")),
    }
}

/// Running per-category totals for the fail-fast pass
#[derive(Default)]
struct CategoryCounts {
    deployment: usize,
    scenography: usize,
    solid: usize,
    passable: usize,
}

impl CategoryCounts {
    fn record(&mut self, category: ShapeCategory) -> DomainResult<()> {
        match category {
            ShapeCategory::Deployment => {
                self.deployment += 1;
                if self.deployment > MAX_DEPLOYMENT_SHAPES {
                    return Err(DomainError::validation("too many deployment shapes (max 4)"));
                }
            }
            ShapeCategory::SolidScenography | ShapeCategory::PassableScenography => {
                self.scenography += 1;
                if category == ShapeCategory::SolidScenography {
                    self.solid += 1;
                } else {
                    self.passable += 1;
                }
                if self.scenography > MAX_SCENOGRAPHY_SHAPES {
                    return Err(DomainError::validation("too many scenography shapes (max 6)"));
                }
                if self.solid > MAX_SOLID_SCENOGRAPHY {
                    return Err(DomainError::validation("too many solid scenography shapes (max 3)"));
                }
                if self.passable > MAX_PASSABLE_SCENOGRAPHY {
                    return Err(DomainError::validation("too many passable scenography shapes (max 3)"));
                }
            }
            ShapeCategory::Objective => {
                return Err(DomainError::validation(
                    "objective points belong in objective_shapes",
                ));
            }
        }
        Ok(())
    }
}

fn validate_layout(table: &TableSize, shapes: &[Shape], objective_shapes: &[Shape]) -> DomainResult<()> {
    if shapes.len() > MAX_SHAPES {
        return Err(DomainError::validation("too many shapes"));
    }

    let mut counts = CategoryCounts::default();
    for shape in shapes {
        shape.validate_geometry()?;
        check_anchor_coupling(shape)?;
        counts.record(shape.category())?;
        if !shape.is_within(table) {
            return Err(DomainError::validation(format!(
                "{} out of bounds",
                shape.kind.type_name()
            )));
        }
        check_anchor_position(shape, table)?;
    }

    if objective_shapes.len() > MAX_OBJECTIVE_POINTS {
        return Err(DomainError::validation("too many objective points (max 10)"));
    }
    for shape in objective_shapes {
        if !matches!(shape.kind, ShapeKind::ObjectivePoint { .. }) {
            return Err(DomainError::validation(
                "objective_shapes may only contain objective_point",
            ));
        }
        if !shape.is_within(table) {
            return Err(DomainError::validation("objective_point out of bounds"));
        }
    }

    check_collisions(shapes, objective_shapes)
}

/// Deployment zones sit on exactly one anchor: a border (rect) or a corner (polygon)
fn check_anchor_coupling(shape: &Shape) -> DomainResult<()> {
    match (&shape.border, &shape.corner) {
        (Some(_), Some(_)) => Err(DomainError::validation(
            "deployment shape cannot have both border and corner",
        )),
        (Some(_), None) if !matches!(shape.kind, ShapeKind::Rect { .. }) => Err(
            DomainError::validation("border deployment shape must be rect"),
        ),
        (None, Some(_)) if !matches!(shape.kind, ShapeKind::Polygon { .. }) => Err(
            DomainError::validation("corner deployment shape must be polygon"),
        ),
        _ => Ok(()),
    }
}

/// The anchored edge must be touched, the anchored corner must be a vertex
fn check_anchor_position(shape: &Shape, table: &TableSize) -> DomainResult<()> {
    let w = i64::from(table.width_mm());
    let h = i64::from(table.height_mm());
    if let (Some(border), ShapeKind::Rect { x, y, width, height }) = (shape.border, &shape.kind) {
        let touches = match border {
            Border::North => *y == 0,
            Border::South => y.checked_add(*height) == Some(h),
            Border::West => *x == 0,
            Border::East => x.checked_add(*width) == Some(w),
        };
        if !touches {
            return Err(DomainError::validation(format!(
                "border deployment shape must touch the {} edge",
                border
            )));
        }
    }
    if let (Some(corner), ShapeKind::Polygon { points }) = (shape.corner, &shape.kind) {
        if !points.contains(&corner.point(table)) {
            return Err(DomainError::validation(
                "corner deployment shape must include its table corner",
            ));
        }
    }
    Ok(())
}

fn check_collisions(shapes: &[Shape], objective_shapes: &[Shape]) -> DomainResult<()> {
    if let Some((i, j)) = find_first_collision(shapes, MIN_CLEARANCE_MM) {
        return Err(DomainError::validation(format!(
            "shapes {} and {} overlap or are closer than {} mm",
            i, j, MIN_CLEARANCE_MM
        )));
    }
    if let Some((i, j)) = find_first_collision(objective_shapes, MIN_CLEARANCE_MM) {
        return Err(DomainError::validation(format!(
            "objective points {} and {} overlap or are closer than {} mm",
            i, j, MIN_CLEARANCE_MM
        )));
    }
    for (i, objective) in objective_shapes.iter().enumerate() {
        let blocked = shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.category() == ShapeCategory::SolidScenography)
            .find(|(_, s)| shapes_overlap(objective, s, MIN_CLEARANCE_MM));
        if let Some((j, _)) = blocked {
            return Err(DomainError::validation(format!(
                "objective point {} overlaps solid scenography shape {}",
                i, j
            )));
        }
    }
    Ok(())
}
