//! Card API routes

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::{actor_id, domain_error, service_error};
use crate::application::dto::{
    CardResponseDto, CreateVariantRequestDto, FavoriteToggleResponseDto, FavoritesResponseDto,
    GenerateCardRequestDto, ListCardsQuery, UpdateCardRequestDto,
};
use crate::application::services::CardService;
use crate::domain::value_objects::CardId;
use crate::infrastructure::state::AppState;

fn parse_card_id(id: &str) -> Result<CardId, (StatusCode, String)> {
    id.parse()
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid card ID".to_string()))
}

/// List cards visible to the caller
pub async fn list_cards(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListCardsQuery>,
) -> Result<Json<Vec<CardResponseDto>>, (StatusCode, String)> {
    let actor = actor_id(&headers)?;
    let filter = query.filter().map_err(domain_error)?;

    let cards = state
        .card_service
        .list_cards(&actor, filter)
        .await
        .map_err(service_error)?;

    Ok(Json(cards.into_iter().map(CardResponseDto::from).collect()))
}

/// Generate a new card
pub async fn generate_card(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<GenerateCardRequestDto>,
) -> Result<(StatusCode, Json<CardResponseDto>), (StatusCode, String)> {
    let actor = actor_id(&headers)?;
    let request = req.into_request(&actor).map_err(domain_error)?;

    let card = state
        .card_service
        .generate_card(request)
        .await
        .map_err(service_error)?;

    Ok((StatusCode::CREATED, Json(CardResponseDto::from(card))))
}

/// Get a card by ID
pub async fn get_card(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<CardResponseDto>, (StatusCode, String)> {
    let actor = actor_id(&headers)?;
    let id = parse_card_id(&id)?;

    let card = state
        .card_service
        .get_card(&actor, id)
        .await
        .map_err(service_error)?;

    Ok(Json(CardResponseDto::from(card)))
}

/// Edit a card
pub async fn update_card(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<UpdateCardRequestDto>,
) -> Result<Json<CardResponseDto>, (StatusCode, String)> {
    let actor = actor_id(&headers)?;
    let id = parse_card_id(&id)?;
    let request = req.into_request().map_err(domain_error)?;

    let card = state
        .card_service
        .update_card(&actor, id, request)
        .await
        .map_err(service_error)?;

    Ok(Json(CardResponseDto::from(card)))
}

/// Delete a card
pub async fn delete_card(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let actor = actor_id(&headers)?;
    let id = parse_card_id(&id)?;

    state
        .card_service
        .delete_card(&actor, id)
        .await
        .map_err(service_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Create a variant of a card with a new seed
pub async fn create_variant(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<CreateVariantRequestDto>,
) -> Result<(StatusCode, Json<CardResponseDto>), (StatusCode, String)> {
    let actor = actor_id(&headers)?;
    let id = parse_card_id(&id)?;

    let card = state
        .card_service
        .create_variant(&actor, id, req.into())
        .await
        .map_err(service_error)?;

    Ok((StatusCode::CREATED, Json(CardResponseDto::from(card))))
}

/// Render a card's map as SVG
pub async fn render_card_svg(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let actor = actor_id(&headers)?;
    let id = parse_card_id(&id)?;

    let svg = state
        .card_service
        .render_card_svg(&actor, id)
        .await
        .map_err(service_error)?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// Flip the caller's favorite mark on a card
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<FavoriteToggleResponseDto>, (StatusCode, String)> {
    let actor = actor_id(&headers)?;
    let id = parse_card_id(&id)?;

    let is_favorite = state
        .card_service
        .toggle_favorite(&actor, id)
        .await
        .map_err(service_error)?;

    Ok(Json(FavoriteToggleResponseDto {
        card_id: id.to_string(),
        is_favorite,
    }))
}

/// The caller's readable favorites
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<FavoritesResponseDto>, (StatusCode, String)> {
    let actor = actor_id(&headers)?;

    let cards = state
        .card_service
        .list_favorites(&actor)
        .await
        .map_err(service_error)?;

    Ok(Json(cards.into_iter().collect()))
}
