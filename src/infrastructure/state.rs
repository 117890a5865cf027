//! Shared application state

use std::sync::Arc;

use crate::application::services::CardServiceImpl;
use crate::domain::services::ScenarioGenerator;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::InMemoryCardRepository;
use crate::infrastructure::rendering::SvgMapRenderer;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub card_service: CardServiceImpl,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let card_service = CardServiceImpl::new(
            Arc::new(InMemoryCardRepository::new()),
            Arc::new(SvgMapRenderer),
            ScenarioGenerator::new(config.max_generation_attempts),
        );

        Self {
            config,
            card_service,
        }
    }
}
