//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Config: Application configuration
//! - Persistence: Card storage
//! - Rendering: SVG map output
//! - HTTP: REST API routes
//! - State: Shared application state

pub mod config;
pub mod http;
pub mod persistence;
pub mod rendering;
pub mod state;
