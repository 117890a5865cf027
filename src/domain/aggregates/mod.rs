//! Aggregates - Cluster of domain objects treated as a single unit

mod card;

pub use card::{Card, CardParts, CardRevision};
