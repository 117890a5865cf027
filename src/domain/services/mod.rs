//! Domain services - Pure operations spanning several value objects

mod content_resolver;
mod scenario_generator;

pub use content_resolver::{preview_seed, resolve_content, SeedPreview};
pub use scenario_generator::ScenarioGenerator;
