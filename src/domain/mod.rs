//! Domain layer - Core business logic with no I/O
//!
//! This layer contains:
//! - Value Objects: table sizes, seeds, modes, visibility, scenario text
//! - Maps: shapes, the collision engine and the validated MapSpec
//! - Security: the read/write gate
//! - Domain Services: seeded content resolution and map generation
//! - Aggregates: the Card aggregate root

pub mod aggregates;
pub mod errors;
pub mod maps;
pub mod security;
pub mod services;
pub mod value_objects;
