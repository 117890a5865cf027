//! In-process card store

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::CardRepositoryPort;
use crate::domain::aggregates::Card;
use crate::domain::value_objects::CardId;

/// Card repository backed by a shared map. Cloning shares the store.
#[derive(Clone, Default)]
pub struct InMemoryCardRepository {
    cards: Arc<RwLock<HashMap<CardId, Card>>>,
    /// Favorite card ids per user
    favorites: Arc<RwLock<HashMap<String, BTreeSet<CardId>>>>,
}

impl InMemoryCardRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first, ties broken by id so listings are stable
fn newest_first(mut cards: Vec<Card>) -> Vec<Card> {
    cards.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| a.id().cmp(&b.id()))
    });
    cards
}

#[async_trait]
impl CardRepositoryPort for InMemoryCardRepository {
    async fn save(&self, card: &Card) -> Result<()> {
        self.cards.write().await.insert(card.id(), card.clone());
        Ok(())
    }

    async fn get(&self, id: CardId) -> Result<Option<Card>> {
        Ok(self.cards.read().await.get(&id).cloned())
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Card>> {
        let cards = self
            .cards
            .read()
            .await
            .values()
            .filter(|card| card.owner_id() == owner_id)
            .cloned()
            .collect();
        Ok(newest_first(cards))
    }

    async fn list_all(&self) -> Result<Vec<Card>> {
        let cards = self.cards.read().await.values().cloned().collect();
        Ok(newest_first(cards))
    }

    async fn delete(&self, id: CardId) -> Result<bool> {
        Ok(self.cards.write().await.remove(&id).is_some())
    }

    async fn is_favorite(&self, user_id: &str, id: CardId) -> Result<bool> {
        Ok(self
            .favorites
            .read()
            .await
            .get(user_id)
            .is_some_and(|ids| ids.contains(&id)))
    }

    async fn set_favorite(&self, user_id: &str, id: CardId, favorite: bool) -> Result<()> {
        let mut favorites = self.favorites.write().await;
        if favorite {
            favorites.entry(user_id.to_string()).or_default().insert(id);
        } else if let Some(ids) = favorites.get_mut(user_id) {
            ids.remove(&id);
            if ids.is_empty() {
                favorites.remove(user_id);
            }
        }
        Ok(())
    }

    async fn list_favorite_ids(&self, user_id: &str) -> Result<Vec<CardId>> {
        Ok(self
            .favorites
            .read()
            .await
            .get(user_id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default())
    }
}
