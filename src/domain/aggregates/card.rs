//! Card Aggregate - The root aggregate for a generated scenario
//!
//! A card wraps a validated map with its seed, text content, ownership and
//! sharing settings. Cards are immutable: an edit produces a new validated
//! card with the same id and seed.

use chrono::{DateTime, Utc};

use crate::domain::errors::{require_non_empty, DomainError, DomainResult};
use crate::domain::maps::MapSpec;
use crate::domain::security;
use crate::domain::value_objects::{
    CardId, GameMode, ScenarioContent, Seed, SharedWith, TableSize, Visibility,
};

/// Everything needed to build a card
#[derive(Debug, Clone)]
pub struct CardParts {
    pub id: CardId,
    pub owner_id: String,
    pub visibility: Visibility,
    pub shared_with: SharedWith,
    pub mode: GameMode,
    pub seed: Seed,
    pub table: TableSize,
    pub map_spec: MapSpec,
    pub content: ScenarioContent,
}

/// Fields an edit may replace. Identity, owner and seed never change.
#[derive(Debug, Clone)]
pub struct CardRevision {
    pub visibility: Visibility,
    pub shared_with: SharedWith,
    pub mode: GameMode,
    pub map_spec: MapSpec,
    pub content: ScenarioContent,
}

/// The Card Aggregate Root
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    id: CardId,
    owner_id: String,
    visibility: Visibility,
    shared_with: SharedWith,
    mode: GameMode,
    seed: Seed,
    table: TableSize,
    map_spec: MapSpec,
    content: ScenarioContent,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Card {
    /// Build a new card, validating every cross-field invariant
    ///
    /// # Invariants
    /// - Owner id must not be blank
    /// - `shared_with` is non-empty exactly when visibility is shared
    /// - The map belongs to the card's table
    pub fn new(parts: CardParts) -> DomainResult<Self> {
        let now = Utc::now();
        let owner_id = require_non_empty("owner_id", &parts.owner_id)?.to_string();
        validate_sharing(parts.visibility, &parts.shared_with)?;
        validate_table(&parts.table, &parts.map_spec)?;

        Ok(Self {
            id: parts.id,
            owner_id,
            visibility: parts.visibility,
            shared_with: parts.shared_with,
            mode: parts.mode,
            seed: parts.seed,
            table: parts.table,
            map_spec: parts.map_spec,
            content: parts.content,
            created_at: now,
            updated_at: now,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn shared_with(&self) -> &SharedWith {
        &self.shared_with
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn table(&self) -> &TableSize {
        &self.table
    }

    pub fn map_spec(&self) -> &MapSpec {
        &self.map_spec
    }

    pub fn content(&self) -> &ScenarioContent {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ========================================================================
    // Access control
    // ========================================================================

    pub fn can_user_read(&self, user_id: &str) -> DomainResult<bool> {
        security::can_read(&self.owner_id, self.visibility, user_id, &self.shared_with)
    }

    pub fn can_user_write(&self, user_id: &str) -> DomainResult<bool> {
        security::can_write(&self.owner_id, user_id)
    }

    /// Fail with `Forbidden` unless the user may read
    pub fn ensure_readable_by(&self, user_id: &str) -> DomainResult<()> {
        if self.can_user_read(user_id)? {
            Ok(())
        } else {
            Err(DomainError::forbidden("You do not have access to this card"))
        }
    }

    /// Fail with `Forbidden` unless the user owns the card
    pub fn ensure_writable_by(&self, user_id: &str) -> DomainResult<()> {
        if self.can_user_write(user_id)? {
            Ok(())
        } else {
            Err(DomainError::forbidden("Only the owner can modify this card"))
        }
    }

    // ========================================================================
    // Revisions
    // ========================================================================

    /// A new validated card with the same id, owner, seed and creation time
    pub fn revise(&self, revision: CardRevision) -> DomainResult<Card> {
        validate_sharing(revision.visibility, &revision.shared_with)?;
        let table = *revision.map_spec.table();

        Ok(Card {
            id: self.id,
            owner_id: self.owner_id.clone(),
            visibility: revision.visibility,
            shared_with: revision.shared_with,
            mode: revision.mode,
            seed: self.seed,
            table,
            map_spec: revision.map_spec,
            content: revision.content,
            created_at: self.created_at,
            updated_at: Utc::now().max(self.created_at),
        })
    }
}

fn validate_sharing(visibility: Visibility, shared_with: &SharedWith) -> DomainResult<()> {
    match (visibility, shared_with.is_empty()) {
        (Visibility::Shared, true) => Err(DomainError::validation(
            "shared visibility requires a non-empty shared_with",
        )),
        (Visibility::Private | Visibility::Public, false) => Err(DomainError::validation(
            "shared_with requires visibility to be 'shared'",
        )),
        _ => Ok(()),
    }
}

fn validate_table(table: &TableSize, map_spec: &MapSpec) -> DomainResult<()> {
    if map_spec.table() != table {
        return Err(DomainError::validation("map_spec table must match card table"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ContentOverrides, Objectives};
    use crate::domain::services::resolve_content;

    fn content() -> ScenarioContent {
        resolve_content(Seed::new(1), &ContentOverrides::default(), None).unwrap()
    }

    fn parts(visibility: Visibility, shared_with: SharedWith) -> CardParts {
        let table = TableSize::standard();
        CardParts {
            id: CardId::new(),
            owner_id: "alice".into(),
            visibility,
            shared_with,
            mode: GameMode::Matched,
            seed: Seed::new(123),
            table,
            map_spec: MapSpec::new(table, vec![], vec![]).unwrap(),
            content: content(),
        }
    }

    #[test]
    fn test_create_private_card() {
        let card = Card::new(parts(Visibility::Private, SharedWith::empty())).unwrap();
        assert_eq!(card.owner_id(), "alice");
        assert_eq!(card.created_at(), card.updated_at());
        assert!(card.can_user_read("alice").unwrap());
        assert!(!card.can_user_read("bob").unwrap());
        assert!(card.ensure_readable_by("bob").is_err());
    }

    #[test]
    fn test_owner_must_not_be_blank() {
        let mut p = parts(Visibility::Public, SharedWith::empty());
        p.owner_id = "  ".into();
        assert!(Card::new(p).is_err());
    }

    #[test]
    fn test_shared_requires_recipients() {
        assert!(Card::new(parts(Visibility::Shared, SharedWith::empty())).is_err());
        let shared = SharedWith::new(["bob"]).unwrap();
        let card = Card::new(parts(Visibility::Shared, shared.clone())).unwrap();
        assert!(card.can_user_read("bob").unwrap());
        assert!(!card.can_user_read("carol").unwrap());
        assert!(!card.can_user_write("bob").unwrap());

        let err = Card::new(parts(Visibility::Public, shared)).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("shared_with requires visibility to be 'shared'")
        );
    }

    #[test]
    fn test_map_table_must_match() {
        let mut p = parts(Visibility::Private, SharedWith::empty());
        p.table = TableSize::massive();
        assert!(Card::new(p).is_err());
    }

    #[test]
    fn test_revise_keeps_identity_and_seed() {
        let card = Card::new(parts(Visibility::Private, SharedWith::empty())).unwrap();
        let table = TableSize::massive();
        let mut new_content = card.content().clone();
        new_content.objectives = Objectives::Text("Hold the ford".into());
        let revised = card
            .revise(CardRevision {
                visibility: Visibility::Public,
                shared_with: SharedWith::empty(),
                mode: GameMode::Casual,
                map_spec: MapSpec::new(table, vec![], vec![]).unwrap(),
                content: new_content,
            })
            .unwrap();
        assert_eq!(revised.id(), card.id());
        assert_eq!(revised.seed(), card.seed());
        assert_eq!(revised.owner_id(), card.owner_id());
        assert_eq!(revised.table(), &table);
        assert_eq!(revised.created_at(), card.created_at());
        assert!(revised.updated_at() >= card.updated_at());
        assert_eq!(revised.mode(), GameMode::Casual);
    }

    #[test]
    fn test_revise_revalidates_sharing() {
        let card = Card::new(parts(Visibility::Private, SharedWith::empty())).unwrap();
        let result = card.revise(CardRevision {
            visibility: Visibility::Shared,
            shared_with: SharedWith::empty(),
            mode: card.mode(),
            map_spec: card.map_spec().clone(),
            content: card.content().clone(),
        });
        assert!(result.is_err());
    }
}
