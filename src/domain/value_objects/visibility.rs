//! Card visibility and share lists

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Who besides the owner may read a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Shared,
    Public,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Private => write!(f, "private"),
            Visibility::Shared => write!(f, "shared"),
            Visibility::Public => write!(f, "public"),
        }
    }
}

impl std::str::FromStr for Visibility {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "private" => Ok(Visibility::Private),
            "shared" => Ok(Visibility::Shared),
            "public" => Ok(Visibility::Public),
            other => Err(DomainError::validation(format!(
                "invalid visibility '{}', must be one of: private, public, shared",
                other
            ))),
        }
    }
}

/// Set of user ids a shared card is visible to.
///
/// Entries are trimmed and must be non-empty. Duplicates collapse. Being a
/// dedicated type, a bare string can never be mistaken for the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SharedWith(BTreeSet<String>);

impl SharedWith {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new<I, S>(users: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for user in users {
            let user = user.as_ref().trim();
            if user.is_empty() {
                return Err(DomainError::validation(
                    "shared_with entries cannot be empty or whitespace-only",
                ));
            }
            set.insert(user.to_string());
        }
        Ok(Self(set))
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.0.contains(user_id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
