use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::application::services::{
    CardFilter, CreateVariantRequest, GenerateCardRequest, UpdateCardRequest, ValidateMapRequest,
};
use crate::domain::aggregates::Card;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::maps::{MapSpec, Shape};
use crate::domain::services::SeedPreview;
use crate::domain::value_objects::{
    ContentOverrides, GameMode, LengthUnit, Objectives, Seed, SeedRequest, SharedWith,
    SpecialRule, TablePreset, TableSize, Theme, Visibility,
};

// =============================================================================
// Table input
// =============================================================================

/// Table selection: a preset, or custom dimensions in a unit (cm by default)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableRequestDto {
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub width: Option<Value>,
    #[serde(default)]
    pub height: Option<Value>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl TableRequestDto {
    pub fn resolve(&self) -> DomainResult<TableSize> {
        let preset = match self.preset.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse::<TablePreset>()?,
            _ => TablePreset::Standard,
        };
        if let Some(table) = TableSize::from_preset(preset) {
            return Ok(table);
        }

        let (width, height) = match (&self.width, &self.height) {
            (Some(w), Some(h)) => (dimension_text("width", w)?, dimension_text("height", h)?),
            _ => {
                return Err(DomainError::validation(
                    "custom table requires width and height",
                ))
            }
        };
        let unit = match self.unit.as_deref() {
            Some(raw) => raw.parse::<LengthUnit>()?,
            None => LengthUnit::Cm,
        };
        TableSize::from_dimensions(&width, &height, unit)
    }
}

/// Dimensions may arrive as JSON numbers or decimal strings
fn dimension_text(field: &str, value: &Value) -> DomainResult<String> {
    match value {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        _ => Err(DomainError::validation(format!(
            "{} must be a number",
            field
        ))),
    }
}

fn parse_visibility(raw: Option<&str>) -> DomainResult<Option<Visibility>> {
    raw.map(str::parse::<Visibility>).transpose()
}

/// Keeps an explicit `null` apart from an absent field
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Absent shapes ask the generator; `null` is not a layout
fn manual_shapes(shapes: Option<Value>) -> DomainResult<Option<Value>> {
    match shapes {
        Some(Value::Null) => Err(DomainError::validation("shapes cannot be null")),
        other => Ok(other),
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateCardRequestDto {
    pub mode: String,
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(default)]
    pub surprise: bool,
    #[serde(default)]
    pub table: TableRequestDto,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub shared_with: Vec<String>,
    #[serde(flatten)]
    pub content: ContentOverrides,
    #[serde(default, deserialize_with = "present")]
    pub shapes: Option<Value>,
    #[serde(default)]
    pub objective_shapes: Option<Value>,
}

impl GenerateCardRequestDto {
    pub fn into_request(self, owner_id: &str) -> DomainResult<GenerateCardRequest> {
        Ok(GenerateCardRequest {
            owner_id: owner_id.to_string(),
            mode: self.mode.parse::<GameMode>()?,
            seed: SeedRequest::from_input(self.seed, self.surprise),
            table: self.table.resolve()?,
            visibility: parse_visibility(self.visibility.as_deref())?
                .unwrap_or(Visibility::Private),
            shared_with: SharedWith::new(self.shared_with)?,
            content: self.content,
            shapes: manual_shapes(self.shapes)?,
            objective_shapes: self.objective_shapes,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCardRequestDto {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub table: Option<TableRequestDto>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub shared_with: Option<Vec<String>>,
    #[serde(flatten)]
    pub content: ContentOverrides,
    #[serde(default, deserialize_with = "present")]
    pub shapes: Option<Value>,
    #[serde(default)]
    pub objective_shapes: Option<Value>,
}

impl UpdateCardRequestDto {
    pub fn into_request(self) -> DomainResult<UpdateCardRequest> {
        Ok(UpdateCardRequest {
            mode: self.mode.as_deref().map(str::parse::<GameMode>).transpose()?,
            table: self.table.as_ref().map(TableRequestDto::resolve).transpose()?,
            visibility: parse_visibility(self.visibility.as_deref())?,
            shared_with: self.shared_with.map(SharedWith::new).transpose()?,
            content: self.content,
            shapes: manual_shapes(self.shapes)?,
            objective_shapes: self.objective_shapes,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateVariantRequestDto {
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(flatten)]
    pub content: ContentOverrides,
}

impl From<CreateVariantRequestDto> for CreateVariantRequest {
    fn from(dto: CreateVariantRequestDto) -> Self {
        let seed = match SeedRequest::from_input(dto.seed, true) {
            SeedRequest::Explicit(seed) => Some(seed),
            SeedRequest::Derive | SeedRequest::Surprise => None,
        };
        Self {
            seed,
            content: dto.content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ValidateMapRequestDto {
    #[serde(default)]
    pub table: TableRequestDto,
    #[serde(default)]
    pub shapes: Value,
    #[serde(default)]
    pub objective_shapes: Option<Value>,
}

impl ValidateMapRequestDto {
    pub fn into_request(self) -> DomainResult<ValidateMapRequest> {
        Ok(ValidateMapRequest {
            table: self.table.resolve()?,
            shapes: self.shapes,
            objective_shapes: self.objective_shapes,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListCardsQuery {
    #[serde(default)]
    pub filter: Option<String>,
}

impl ListCardsQuery {
    pub fn filter(&self) -> DomainResult<CardFilter> {
        match self.filter.as_deref() {
            Some(raw) => raw.parse(),
            None => Ok(CardFilter::Mine),
        }
    }
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TableResponseDto {
    pub width_mm: u32,
    pub height_mm: u32,
    pub width_cm: String,
    pub height_cm: String,
}

impl From<&TableSize> for TableResponseDto {
    fn from(table: &TableSize) -> Self {
        Self {
            width_mm: table.width_mm(),
            height_mm: table.height_mm(),
            width_cm: table.width_cm(),
            height_cm: table.height_cm(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MapSpecResponseDto {
    pub table: TableResponseDto,
    pub shapes: Vec<Shape>,
    pub objective_shapes: Vec<Shape>,
}

impl From<&MapSpec> for MapSpecResponseDto {
    fn from(map: &MapSpec) -> Self {
        Self {
            table: TableResponseDto::from(map.table()),
            shapes: map.shapes().to_vec(),
            objective_shapes: map.objective_shapes().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CardResponseDto {
    pub id: String,
    pub owner_id: String,
    pub visibility: String,
    pub shared_with: Vec<String>,
    pub mode: String,
    pub seed: Seed,
    pub table: TableResponseDto,
    pub name: String,
    pub armies: String,
    pub deployment: String,
    pub layout: String,
    pub objectives: Objectives,
    pub initial_priority: String,
    pub special_rules: Vec<SpecialRule>,
    pub shapes: Vec<Shape>,
    pub objective_shapes: Vec<Shape>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Card> for CardResponseDto {
    fn from(card: Card) -> Self {
        let content = card.content().clone();
        Self {
            id: card.id().to_string(),
            owner_id: card.owner_id().to_string(),
            visibility: card.visibility().to_string(),
            shared_with: card.shared_with().iter().map(str::to_string).collect(),
            mode: card.mode().to_string(),
            seed: card.seed(),
            table: TableResponseDto::from(card.table()),
            name: content.name,
            armies: content.armies,
            deployment: content.deployment,
            layout: content.layout,
            objectives: content.objectives,
            initial_priority: content.initial_priority,
            special_rules: content.special_rules,
            shapes: card.map_spec().shapes().to_vec(),
            objective_shapes: card.map_spec().objective_shapes().to_vec(),
            created_at: card.created_at().to_rfc3339(),
            updated_at: card.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FavoriteToggleResponseDto {
    pub card_id: String,
    pub is_favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponseDto {
    pub card_ids: Vec<String>,
}

impl FromIterator<Card> for FavoritesResponseDto {
    fn from_iter<I: IntoIterator<Item = Card>>(cards: I) -> Self {
        Self {
            card_ids: cards.into_iter().map(|card| card.id().to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PresetDto {
    pub name: String,
    pub width_mm: Option<u32>,
    pub height_mm: Option<u32>,
}

impl From<TablePreset> for PresetDto {
    fn from(preset: TablePreset) -> Self {
        let table = TableSize::from_preset(preset);
        Self {
            name: preset.to_string(),
            width_mm: table.map(|t| t.width_mm()),
            height_mm: table.map(|t| t.height_mm()),
        }
    }
}

/// Everything a client needs to populate its forms
#[derive(Debug, Serialize)]
pub struct PresetsResponseDto {
    pub tables: Vec<PresetDto>,
    pub modes: Vec<String>,
    pub visibilities: Vec<String>,
    pub units: Vec<String>,
}

impl PresetsResponseDto {
    pub fn catalog() -> Self {
        Self {
            tables: TablePreset::ALL.into_iter().map(PresetDto::from).collect(),
            modes: GameMode::ALL.iter().map(ToString::to_string).collect(),
            visibilities: [Visibility::Private, Visibility::Shared, Visibility::Public]
                .iter()
                .map(ToString::to_string)
                .collect(),
            units: [LengthUnit::Cm, LengthUnit::In, LengthUnit::Ft, LengthUnit::Mm]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SeedPreviewDto {
    pub seed: Seed,
    pub theme: Theme,
    pub armies: String,
    pub deployment: String,
    pub layout: String,
    pub objectives: String,
    pub initial_priority: String,
}

impl From<SeedPreview> for SeedPreviewDto {
    fn from(preview: SeedPreview) -> Self {
        Self {
            seed: preview.seed,
            theme: preview.theme,
            armies: preview.armies,
            deployment: preview.deployment,
            layout: preview.layout,
            objectives: preview.objectives,
            initial_priority: preview.initial_priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_defaults_to_standard() {
        let dto = TableRequestDto::default();
        assert_eq!(dto.resolve().unwrap(), TableSize::standard());
    }

    #[test]
    fn test_custom_table_accepts_numbers_and_strings() {
        let dto: TableRequestDto = serde_json::from_value(json!({
            "preset": "custom", "width": 48, "height": "36", "unit": "in"
        }))
        .unwrap();
        let table = dto.resolve().unwrap();
        assert_eq!(table.width_mm(), 1200);
        assert_eq!(table.height_mm(), 900);
    }

    #[test]
    fn test_custom_table_requires_dimensions() {
        let dto: TableRequestDto = serde_json::from_value(json!({"preset": "custom"})).unwrap();
        assert!(matches!(dto.resolve(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_generate_request_flattens_content() {
        let dto: GenerateCardRequestDto = serde_json::from_value(json!({
            "mode": "matched",
            "seed": -4,
            "armies": "Rohan vs Isengard",
            "objectives": {"objective": "Hold the gate", "victory_points": ["3 VP"]}
        }))
        .unwrap();
        let request = dto.into_request("alice").unwrap();
        assert_eq!(request.mode, GameMode::Matched);
        assert_eq!(request.seed, SeedRequest::Derive);
        assert_eq!(request.visibility, Visibility::Private);
        assert_eq!(request.content.armies.as_deref(), Some("Rohan vs Isengard"));
        assert!(matches!(
            request.content.objectives,
            Some(Objectives::Structured { .. })
        ));
        assert!(request.shapes.is_none());
    }

    #[test]
    fn test_generate_request_rejects_unknown_mode() {
        let dto: GenerateCardRequestDto =
            serde_json::from_value(json!({"mode": "skirmish"})).unwrap();
        assert!(dto.into_request("alice").is_err());
    }

    #[test]
    fn test_null_shapes_rejected_but_absent_and_empty_accepted() {
        let dto: GenerateCardRequestDto =
            serde_json::from_value(json!({"mode": "casual", "shapes": null})).unwrap();
        let err = dto.into_request("alice").unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg == "shapes cannot be null"));

        let dto: GenerateCardRequestDto =
            serde_json::from_value(json!({"mode": "casual", "shapes": []})).unwrap();
        assert_eq!(dto.into_request("alice").unwrap().shapes, Some(json!([])));

        let dto: UpdateCardRequestDto =
            serde_json::from_value(json!({"name": "Renamed", "shapes": null})).unwrap();
        assert!(matches!(dto.into_request(), Err(DomainError::Validation(_))));

        let dto: UpdateCardRequestDto = serde_json::from_value(json!({"name": "Renamed"})).unwrap();
        let request = dto.into_request().unwrap();
        assert!(request.shapes.is_none());
        assert_eq!(request.content.name.as_deref(), Some("Renamed"));
    }

    #[test]
    fn test_variant_seed_zero_means_random() {
        let dto: CreateVariantRequestDto = serde_json::from_value(json!({"seed": 0})).unwrap();
        assert_eq!(CreateVariantRequest::from(dto).seed, None);
        let dto: CreateVariantRequestDto = serde_json::from_value(json!({"seed": 77})).unwrap();
        assert_eq!(CreateVariantRequest::from(dto).seed, Some(Seed::new(77)));
    }

    #[test]
    fn test_list_filter_defaults_to_mine() {
        assert_eq!(ListCardsQuery::default().filter().unwrap(), CardFilter::Mine);
        let query = ListCardsQuery {
            filter: Some("bogus".into()),
        };
        assert!(query.filter().is_err());
    }

    #[test]
    fn test_presets_catalog() {
        let catalog = PresetsResponseDto::catalog();
        assert_eq!(catalog.tables.len(), 3);
        assert_eq!(catalog.tables[0].name, "standard");
        assert_eq!(catalog.tables[0].width_mm, Some(1200));
        assert_eq!(catalog.tables[2].width_mm, None);
        assert_eq!(catalog.modes, vec!["casual", "narrative", "matched"]);
    }
}
