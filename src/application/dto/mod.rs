//! Data transfer objects for the HTTP surface

mod card;

pub use card::*;
