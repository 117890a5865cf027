//! Rendering port - Turns a map into a presentable document

use crate::domain::maps::Shape;
use crate::domain::value_objects::TableSize;

/// Renders a table and its shapes. Output must be a pure function of the input.
pub trait MapRendererPort: Send + Sync {
    fn render(&self, table: &TableSize, shapes: &[Shape]) -> String;
}
