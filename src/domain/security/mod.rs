//! Access control for cards

mod authz;

pub use authz::{can_read, can_write};
