//! Value objects - Immutable objects defined by their attributes

mod content;
mod game_mode;
mod ids;
mod seed;
mod table_size;
mod themes;
mod visibility;

pub use content::{
    non_blank, validate_special_rules, ContentOverrides, Objectives, ScenarioContent, SpecialRule,
    DEFAULT_INITIAL_PRIORITY,
};
pub use game_mode::GameMode;
pub use ids::*;
pub use seed::{Seed, SeedRequest, MAX_SEED};
pub use table_size::{LengthUnit, TablePreset, TableSize, MAX_MM, MIN_MM};
pub use themes::{
    pick, Theme, ThemeCatalog, DEPLOYMENT_DESCRIPTIONS, OBJECTIVE_DESCRIPTIONS,
    PASSABLE_SCENOGRAPHY_DESCRIPTIONS, SOLID_SCENOGRAPHY_DESCRIPTIONS,
};
pub use visibility::{SharedWith, Visibility};
