//! Domain error taxonomy
//!
//! Every failure the core can produce falls into one of four kinds. Callers
//! at the boundary translate the kind into a response code; the message is
//! human-readable and never carries internal state.

/// Errors raised by domain constructors, the generator and the authorization gate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Malformed or out-of-range input. Recoverable by correcting the request.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The bounded-retry generator could not produce a valid layout
    #[error("Could not generate a valid layout for seed {seed} after {attempts} attempts")]
    GenerationExhausted { seed: u32, attempts: u32 },

    /// The actor lacks permission for the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A referenced card or id does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

/// Shorthand used throughout the domain layer
pub type DomainResult<T> = Result<T, DomainError>;

/// Trim a required identifier, rejecting empty or whitespace-only values
pub fn require_non_empty<'a>(field: &str, value: &'a str) -> DomainResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!(
            "{} cannot be empty or whitespace-only",
            field
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert_eq!(require_non_empty("owner_id", "  alice ").unwrap(), "alice");
        assert!(require_non_empty("owner_id", "   ").is_err());
        assert!(require_non_empty("owner_id", "").is_err());
    }

    #[test]
    fn test_error_messages_are_readable() {
        let err = DomainError::GenerationExhausted { seed: 7, attempts: 10 };
        assert_eq!(
            err.to_string(),
            "Could not generate a valid layout for seed 7 after 10 attempts"
        );
        assert_eq!(
            DomainError::validation("bad").to_string(),
            "Validation error: bad"
        );
    }
}
