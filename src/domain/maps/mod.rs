//! Table maps: shapes, collision checks and the validated layout

pub mod collision;
mod map_spec;
mod shape;

pub use collision::{find_first_collision, shapes_overlap, MIN_CLEARANCE_MM};
pub use map_spec::{
    MapSpec, MAX_DEPLOYMENT_SHAPES, MAX_OBJECTIVE_POINTS, MAX_PASSABLE_SCENOGRAPHY,
    MAX_SCENOGRAPHY_SHAPES, MAX_SHAPES, MAX_SOLID_SCENOGRAPHY,
};
pub use shape::{Border, Corner, Point, Shape, ShapeCategory, ShapeKind, OBJECTIVE_RADIUS_MM};
