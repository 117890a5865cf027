//! Repository ports - Interfaces for data persistence
//!
//! These traits define the contracts that infrastructure repositories must implement.
//! Application services depend on these traits, not concrete implementations.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::aggregates::Card;
use crate::domain::value_objects::CardId;

// =============================================================================
// Card Repository Port
// =============================================================================

/// Repository port for Card aggregate operations
#[async_trait]
pub trait CardRepositoryPort: Send + Sync {
    /// Insert or replace a card
    async fn save(&self, card: &Card) -> Result<()>;

    /// Get a card by ID
    async fn get(&self, id: CardId) -> Result<Option<Card>>;

    /// List cards owned by a user, newest first
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Card>>;

    /// List every card, newest first
    async fn list_all(&self) -> Result<Vec<Card>>;

    /// Delete a card. Returns false when it did not exist.
    async fn delete(&self, id: CardId) -> Result<bool>;

    // -------------------------------------------------------------------------
    // Favorites
    // -------------------------------------------------------------------------

    /// Whether a user has marked a card as favorite
    async fn is_favorite(&self, user_id: &str, id: CardId) -> Result<bool>;

    /// Mark or unmark a card as favorite for a user
    async fn set_favorite(&self, user_id: &str, id: CardId, favorite: bool) -> Result<()>;

    /// Ids a user has marked as favorite, in id order. May include deleted cards.
    async fn list_favorite_ids(&self, user_id: &str) -> Result<Vec<CardId>>;
}
