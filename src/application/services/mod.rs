//! Application services - Use case implementations
//!
//! Each service accepts its ports as trait objects and returns domain
//! aggregates. HTTP concerns stay in the infrastructure layer.

pub mod card_service;

pub use card_service::{
    CardFilter, CardService, CardServiceError, CardServiceImpl, CardServiceResult,
    CreateVariantRequest, GenerateCardRequest, UpdateCardRequest, ValidateMapRequest,
};
