//! Map validation, presets and seed preview routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::domain_error;
use crate::application::dto::{
    MapSpecResponseDto, PresetsResponseDto, SeedPreviewDto, ValidateMapRequestDto,
};
use crate::application::services::CardService;
use crate::domain::value_objects::Seed;
use crate::infrastructure::state::AppState;

/// Table presets, modes, visibilities and units
pub async fn list_presets() -> Json<PresetsResponseDto> {
    Json(PresetsResponseDto::catalog())
}

/// Validate a map without saving it
pub async fn validate_map(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ValidateMapRequestDto>,
) -> Result<Json<MapSpecResponseDto>, (StatusCode, String)> {
    let request = req.into_request().map_err(domain_error)?;
    let map = state
        .card_service
        .validate_map(request)
        .map_err(domain_error)?;
    Ok(Json(MapSpecResponseDto::from(&map)))
}

/// Text fields a seed would produce
pub async fn preview_seed(
    State(state): State<Arc<AppState>>,
    Path(seed): Path<u64>,
) -> Json<SeedPreviewDto> {
    let preview = state.card_service.preview_seed(Seed::new(seed));
    Json(SeedPreviewDto::from(preview))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::infrastructure::config::AppConfig;
    use crate::infrastructure::http::create_routes;
    use crate::infrastructure::state::AppState;

    fn app() -> Router {
        let config = AppConfig {
            server_port: 0,
            max_generation_attempts: 10,
        };
        create_routes().with_state(Arc::new(AppState::new(config)))
    }

    async fn call(req: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn validate(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/maps/validate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_presets() {
        let req = Request::builder().uri("/api/presets").body(Body::empty()).unwrap();
        let (status, body) = call(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tables"][1]["name"], "massive");
        assert_eq!(body["tables"][1]["width_mm"], 1800);
    }

    #[tokio::test]
    async fn test_validate_accepts_good_map() {
        let (status, body) = call(validate(json!({
            "table": {"preset": "custom", "width": 90, "height": 90},
            "shapes": [
                {"type": "rect", "x": 0, "y": 0, "width": 900, "height": 150, "border": "north"},
                {"type": "circle", "cx": 450, "cy": 450, "r": 80, "description": "Ruined tower"}
            ],
            "objective_shapes": [{"type": "objective_point", "cx": 150, "cy": 700}]
        })))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["table"]["width_mm"], 900);
        assert_eq!(body["shapes"][0]["border"], "north");
        assert_eq!(body["shapes"][1]["description"], "Ruined tower");
    }

    #[tokio::test]
    async fn test_validate_rejects_bad_maps() {
        let (status, _) = call(validate(json!({"shapes": null}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(validate(json!({
            "shapes": [{"type": "circle", "cx": 1190, "cy": 600, "r": 50}]
        })))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(validate(json!({
            "shapes": [{"type": "hexagon"}]
        })))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_seed_preview_is_stable() {
        let req = || {
            Request::builder()
                .uri("/api/seeds/123/preview")
                .body(Body::empty())
                .unwrap()
        };
        let (status, first) = call(req()).await;
        let (_, second) = call(req()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["seed"], 123);
        assert_eq!(first, second);
    }
}
