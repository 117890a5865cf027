//! HTTP REST API routes

mod card_routes;
mod map_routes;

use axum::{
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::error;

use crate::application::services::CardServiceError;
use crate::domain::errors::DomainError;
use crate::infrastructure::state::AppState;

/// Header carrying the id of the calling user
pub const ACTOR_HEADER: &str = "x-actor-id";

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/presets", get(map_routes::list_presets))
        // Card routes
        .route(
            "/api/cards",
            get(card_routes::list_cards).post(card_routes::generate_card),
        )
        .route(
            "/api/cards/{id}",
            get(card_routes::get_card)
                .put(card_routes::update_card)
                .delete(card_routes::delete_card),
        )
        .route(
            "/api/cards/{id}/variants",
            post(card_routes::create_variant),
        )
        .route("/api/cards/{id}/svg", get(card_routes::render_card_svg))
        // Favorites
        .route("/api/favorites", get(card_routes::list_favorites))
        .route(
            "/api/favorites/{id}/toggle",
            post(card_routes::toggle_favorite),
        )
        // Map and seed routes
        .route("/api/maps/validate", post(map_routes::validate_map))
        .route("/api/seeds/{seed}/preview", get(map_routes::preview_seed))
}

/// The calling user, taken from the actor header
pub(crate) fn actor_id(headers: &HeaderMap) -> Result<String, (StatusCode, String)> {
    headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                format!("Missing {} header", ACTOR_HEADER),
            )
        })
}

pub(crate) fn domain_error(err: DomainError) -> (StatusCode, String) {
    match err {
        DomainError::Validation(message) => (StatusCode::BAD_REQUEST, message),
        DomainError::Forbidden(message) => (StatusCode::FORBIDDEN, message),
        DomainError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        err @ DomainError::GenerationExhausted { .. } => {
            error!(error = %err, "Scenario generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not generate a valid map for this seed".to_string(),
            )
        }
    }
}

pub(crate) fn service_error(err: CardServiceError) -> (StatusCode, String) {
    match err {
        CardServiceError::Domain(err) => domain_error(err),
        CardServiceError::Repository(err) => {
            error!(error = %err, "Repository failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            domain_error(DomainError::validation("bad")).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            domain_error(DomainError::forbidden("no")).0,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            domain_error(DomainError::not_found("gone")).0,
            StatusCode::NOT_FOUND
        );
        let (status, message) = domain_error(DomainError::GenerationExhausted {
            seed: 5,
            attempts: 10,
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains('5'));

        let (status, message) =
            service_error(CardServiceError::Repository(anyhow::anyhow!("disk on fire")));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");
    }

    #[test]
    fn test_actor_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(actor_id(&headers).unwrap_err().0, StatusCode::UNAUTHORIZED);
        headers.insert(ACTOR_HEADER, " alice ".parse().unwrap());
        assert_eq!(actor_id(&headers).unwrap(), "alice");
        headers.insert(ACTOR_HEADER, "   ".parse().unwrap());
        assert!(actor_id(&headers).is_err());
    }
}
