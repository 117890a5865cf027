//! Card Service - Application service for scenario cards
//!
//! Generation, editing, variants and rendering all go through here. The
//! service owns seed resolution and map construction; authorization is
//! delegated to the card aggregate.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{CardRepositoryPort, MapRendererPort};
use crate::domain::aggregates::{Card, CardParts, CardRevision};
use crate::domain::errors::{require_non_empty, DomainError, DomainResult};
use crate::domain::maps::{MapSpec, Shape};
use crate::domain::services::{preview_seed, resolve_content, ScenarioGenerator, SeedPreview};
use crate::domain::value_objects::{
    CardId, ContentOverrides, GameMode, Seed, SeedRequest, SharedWith, TableSize, Visibility,
};

/// Errors surfaced by card use cases
#[derive(Debug, thiserror::Error)]
pub enum CardServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repository(#[from] anyhow::Error),
}

pub type CardServiceResult<T> = Result<T, CardServiceError>;

/// Which cards a listing returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFilter {
    /// Cards the actor owns
    Mine,
    /// Public cards from anyone
    Public,
    /// Cards other users shared with the actor
    SharedWithMe,
}

impl std::str::FromStr for CardFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mine" | "" => Ok(CardFilter::Mine),
            "public" => Ok(CardFilter::Public),
            "shared_with_me" => Ok(CardFilter::SharedWithMe),
            other => Err(DomainError::validation(format!(
                "unknown filter '{}', must be one of: mine, public, shared_with_me",
                other
            ))),
        }
    }
}

/// Request to generate a new card
#[derive(Debug, Clone)]
pub struct GenerateCardRequest {
    pub owner_id: String,
    pub mode: GameMode,
    pub seed: SeedRequest,
    pub table: TableSize,
    pub visibility: Visibility,
    pub shared_with: SharedWith,
    pub content: ContentOverrides,
    /// Manual terrain. `None` asks the generator; an empty list means no terrain.
    pub shapes: Option<Value>,
    pub objective_shapes: Option<Value>,
}

/// Request to edit a card. Absent fields keep the card's current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateCardRequest {
    pub mode: Option<GameMode>,
    pub table: Option<TableSize>,
    pub visibility: Option<Visibility>,
    pub shared_with: Option<SharedWith>,
    pub content: ContentOverrides,
    pub shapes: Option<Value>,
    pub objective_shapes: Option<Value>,
}

/// Request to derive a variant from an existing card
#[derive(Debug, Clone, Default)]
pub struct CreateVariantRequest {
    /// `None` draws a fresh random seed
    pub seed: Option<Seed>,
    pub content: ContentOverrides,
}

/// Request to check a hand-drawn map without saving anything
#[derive(Debug, Clone)]
pub struct ValidateMapRequest {
    pub table: TableSize,
    pub shapes: Value,
    pub objective_shapes: Option<Value>,
}

/// Card service trait defining the application use cases
#[async_trait]
pub trait CardService: Send + Sync {
    /// Generate, validate and store a new card
    async fn generate_card(&self, request: GenerateCardRequest) -> CardServiceResult<Card>;

    /// Validate a map without persisting it
    fn validate_map(&self, request: ValidateMapRequest) -> DomainResult<MapSpec>;

    /// Get a card the actor may read
    async fn get_card(&self, actor_id: &str, id: CardId) -> CardServiceResult<Card>;

    /// List cards visible to the actor under a filter
    async fn list_cards(&self, actor_id: &str, filter: CardFilter) -> CardServiceResult<Vec<Card>>;

    /// Edit a card in place, keeping its id and seed
    async fn update_card(
        &self,
        actor_id: &str,
        id: CardId,
        request: UpdateCardRequest,
    ) -> CardServiceResult<Card>;

    /// Create a new card from an existing one with a different seed
    async fn create_variant(
        &self,
        actor_id: &str,
        base_id: CardId,
        request: CreateVariantRequest,
    ) -> CardServiceResult<Card>;

    /// Delete a card the actor owns
    async fn delete_card(&self, actor_id: &str, id: CardId) -> CardServiceResult<()>;

    /// Render a readable card as an SVG document
    async fn render_card_svg(&self, actor_id: &str, id: CardId) -> CardServiceResult<String>;

    /// Flip the actor's favorite mark on a readable card. Returns the new state.
    async fn toggle_favorite(&self, actor_id: &str, id: CardId) -> CardServiceResult<bool>;

    /// The actor's favorites that still exist and are still readable, in id order
    async fn list_favorites(&self, actor_id: &str) -> CardServiceResult<Vec<Card>>;

    /// Text fields a seed would produce
    fn preview_seed(&self, seed: Seed) -> SeedPreview;
}

/// Default implementation of CardService
pub struct CardServiceImpl {
    repository: Arc<dyn CardRepositoryPort>,
    renderer: Arc<dyn MapRendererPort>,
    generator: ScenarioGenerator,
}

impl CardServiceImpl {
    pub fn new(
        repository: Arc<dyn CardRepositoryPort>,
        renderer: Arc<dyn MapRendererPort>,
        generator: ScenarioGenerator,
    ) -> Self {
        Self {
            repository,
            renderer,
            generator,
        }
    }

    async fn load(&self, id: CardId) -> CardServiceResult<Card> {
        self.repository
            .get(id)
            .await
            .context("Failed to get card from repository")?
            .ok_or_else(|| DomainError::not_found(format!("Card {} not found", id)).into())
    }

    /// Manual shapes when given, otherwise the generator's layout
    fn build_map(
        &self,
        seed: Seed,
        table: TableSize,
        mode: GameMode,
        shapes: Option<&Value>,
        objective_shapes: Option<&Value>,
    ) -> DomainResult<MapSpec> {
        match shapes {
            Some(shapes) => MapSpec::from_json(table, shapes, objective_shapes),
            None => self.generator.generate(seed, table, mode),
        }
    }
}

/// Canonical description of a generate request, hashed when no seed is given
fn seed_config(request: &GenerateCardRequest) -> Value {
    let mut config = request.content.seed_config();
    config.insert("mode".into(), json!(request.mode));
    config.insert("table_width_mm".into(), json!(request.table.width_mm()));
    config.insert("table_height_mm".into(), json!(request.table.height_mm()));
    if let Some(shapes) = &request.shapes {
        config.insert("shapes".into(), shapes.clone());
    }
    if let Some(objective_shapes) = &request.objective_shapes {
        config.insert("objective_shapes".into(), objective_shapes.clone());
    }
    Value::Object(config)
}

#[async_trait]
impl CardService for CardServiceImpl {
    #[instrument(skip(self, request), fields(owner_id = %request.owner_id, mode = %request.mode))]
    async fn generate_card(&self, request: GenerateCardRequest) -> CardServiceResult<Card> {
        require_non_empty("owner_id", &request.owner_id)?;
        request.content.validate()?;

        let seed = request.seed.resolve(|| seed_config(&request));
        debug!(seed = %seed, seed_request = ?request.seed, "Resolved seed");

        let map_spec = self.build_map(
            seed,
            request.table,
            request.mode,
            request.shapes.as_ref(),
            request.objective_shapes.as_ref(),
        )?;
        let content = resolve_content(seed, &request.content, None)?;

        let card = Card::new(CardParts {
            id: CardId::new(),
            owner_id: request.owner_id,
            visibility: request.visibility,
            shared_with: request.shared_with,
            mode: request.mode,
            seed,
            table: request.table,
            map_spec,
            content,
        })?;

        self.repository
            .save(&card)
            .await
            .context("Failed to save card in repository")?;

        info!(card_id = %card.id(), seed = %seed, "Generated card: {}", card.content().name);
        Ok(card)
    }

    #[instrument(skip(self, request), fields(width_mm = request.table.width_mm(), height_mm = request.table.height_mm()))]
    fn validate_map(&self, request: ValidateMapRequest) -> DomainResult<MapSpec> {
        let result = MapSpec::from_json(
            request.table,
            &request.shapes,
            request.objective_shapes.as_ref(),
        );
        if let Err(e) = &result {
            debug!(error = %e, "Map rejected");
        }
        result
    }

    #[instrument(skip(self))]
    async fn get_card(&self, actor_id: &str, id: CardId) -> CardServiceResult<Card> {
        debug!(card_id = %id, "Fetching card");
        let card = self.load(id).await?;
        card.ensure_readable_by(actor_id)?;
        Ok(card)
    }

    #[instrument(skip(self))]
    async fn list_cards(&self, actor_id: &str, filter: CardFilter) -> CardServiceResult<Vec<Card>> {
        let actor_id = require_non_empty("actor_id", actor_id)?;
        debug!(?filter, "Listing cards");

        let cards = match filter {
            CardFilter::Mine => self
                .repository
                .list_for_owner(actor_id)
                .await
                .context("Failed to list cards for owner")?,
            CardFilter::Public => self
                .repository
                .list_all()
                .await
                .context("Failed to list cards")?
                .into_iter()
                .filter(|card| card.visibility() == Visibility::Public)
                .collect(),
            CardFilter::SharedWithMe => self
                .repository
                .list_all()
                .await
                .context("Failed to list cards")?
                .into_iter()
                .filter(|card| {
                    card.visibility() == Visibility::Shared
                        && card.owner_id() != actor_id
                        && card.shared_with().contains(actor_id)
                })
                .collect(),
        };
        Ok(cards)
    }

    #[instrument(skip(self, request), fields(card_id = %id))]
    async fn update_card(
        &self,
        actor_id: &str,
        id: CardId,
        request: UpdateCardRequest,
    ) -> CardServiceResult<Card> {
        let card = self.load(id).await?;
        card.ensure_writable_by(actor_id)?;

        let mode = request.mode.unwrap_or(card.mode());
        let table = request.table.unwrap_or(*card.table());
        let map_spec = if request.shapes.is_some() {
            self.build_map(
                card.seed(),
                table,
                mode,
                request.shapes.as_ref(),
                request.objective_shapes.as_ref(),
            )?
        } else {
            let terrain = if table != *card.table() {
                // Old coordinates are meaningless on a new table
                debug!("Table changed, regenerating map from the card seed");
                self.generator.generate(card.seed(), table, mode)?
            } else {
                card.map_spec().clone()
            };
            match &request.objective_shapes {
                Some(objectives) => terrain.with_objective_shapes(Some(objectives))?,
                None => terrain,
            }
        };

        let visibility = request.visibility.unwrap_or(card.visibility());
        let shared_with = match request.shared_with {
            Some(shared_with) => shared_with,
            None if visibility == Visibility::Shared => card.shared_with().clone(),
            None => SharedWith::empty(),
        };
        let content = resolve_content(card.seed(), &request.content, Some(card.content()))?;

        let revised = card.revise(CardRevision {
            visibility,
            shared_with,
            mode,
            map_spec,
            content,
        })?;

        self.repository
            .save(&revised)
            .await
            .context("Failed to save card in repository")?;

        info!(card_id = %revised.id(), "Updated card");
        Ok(revised)
    }

    #[instrument(skip(self, request), fields(base_id = %base_id))]
    async fn create_variant(
        &self,
        actor_id: &str,
        base_id: CardId,
        request: CreateVariantRequest,
    ) -> CardServiceResult<Card> {
        let base = self.load(base_id).await?;
        base.ensure_writable_by(actor_id)?;

        let seed = request.seed.unwrap_or_else(Seed::random);
        if seed == base.seed() {
            warn!(seed = %seed, "Variant reuses the base card seed");
        }

        let map_spec = self.generator.generate(seed, *base.table(), base.mode())?;
        let content = resolve_content(seed, &request.content, Some(base.content()))?;

        let variant = Card::new(CardParts {
            id: CardId::new(),
            owner_id: base.owner_id().to_string(),
            visibility: base.visibility(),
            shared_with: base.shared_with().clone(),
            mode: base.mode(),
            seed,
            table: *base.table(),
            map_spec,
            content,
        })?;

        self.repository
            .save(&variant)
            .await
            .context("Failed to save card in repository")?;

        info!(card_id = %variant.id(), seed = %seed, "Created variant");
        Ok(variant)
    }

    #[instrument(skip(self))]
    async fn delete_card(&self, actor_id: &str, id: CardId) -> CardServiceResult<()> {
        let card = self.load(id).await?;
        card.ensure_writable_by(actor_id)?;

        let removed = self
            .repository
            .delete(id)
            .await
            .context("Failed to delete card from repository")?;
        if !removed {
            return Err(DomainError::not_found(format!("Card {} not found", id)).into());
        }

        info!(card_id = %id, "Deleted card");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn render_card_svg(&self, actor_id: &str, id: CardId) -> CardServiceResult<String> {
        let card = self.get_card(actor_id, id).await?;
        let shapes: Vec<Shape> = card.map_spec().all_shapes().cloned().collect();
        Ok(self.renderer.render(card.table(), &shapes))
    }

    #[instrument(skip(self))]
    async fn toggle_favorite(&self, actor_id: &str, id: CardId) -> CardServiceResult<bool> {
        let actor_id = require_non_empty("actor_id", actor_id)?;
        let card = self.load(id).await?;
        card.ensure_readable_by(actor_id)?;

        let favorite = !self
            .repository
            .is_favorite(actor_id, id)
            .await
            .context("Failed to read favorite")?;
        self.repository
            .set_favorite(actor_id, id, favorite)
            .await
            .context("Failed to save favorite")?;

        info!(card_id = %id, favorite, "Toggled favorite");
        Ok(favorite)
    }

    #[instrument(skip(self))]
    async fn list_favorites(&self, actor_id: &str) -> CardServiceResult<Vec<Card>> {
        let actor_id = require_non_empty("actor_id", actor_id)?;
        let ids = self
            .repository
            .list_favorite_ids(actor_id)
            .await
            .context("Failed to list favorites")?;

        let mut cards = Vec::with_capacity(ids.len());
        for id in ids {
            let card = self
                .repository
                .get(id)
                .await
                .context("Failed to get card from repository")?;
            // Deleted cards and revoked access drop out silently
            match card {
                Some(card) if card.ensure_readable_by(actor_id).is_ok() => cards.push(card),
                _ => debug!(card_id = %id, "Skipping unavailable favorite"),
            }
        }
        Ok(cards)
    }

    fn preview_seed(&self, seed: Seed) -> SeedPreview {
        preview_seed(seed)
    }
}
