//! Read/write gate for owned resources
//!
//! Both checks deny by default: a blank owner or actor id is an error, never
//! a silent grant or refusal.

use crate::domain::errors::{require_non_empty, DomainResult};
use crate::domain::value_objects::{SharedWith, Visibility};

/// Whether `current_user_id` may read a resource.
///
/// The owner always reads. Public resources are readable by anyone, private
/// ones by the owner only, shared ones by members of `shared_with`.
pub fn can_read(
    owner_id: &str,
    visibility: Visibility,
    current_user_id: &str,
    shared_with: &SharedWith,
) -> DomainResult<bool> {
    let owner = require_non_empty("owner_id", owner_id)?;
    let current = require_non_empty("current_user_id", current_user_id)?;

    if owner == current {
        return Ok(true);
    }
    Ok(match visibility {
        Visibility::Public => true,
        Visibility::Private => false,
        Visibility::Shared => shared_with.contains(current),
    })
}

/// Whether `current_user_id` may modify a resource. Owner only.
pub fn can_write(owner_id: &str, current_user_id: &str) -> DomainResult<bool> {
    let owner = require_non_empty("owner_id", owner_id)?;
    let current = require_non_empty("current_user_id", current_user_id)?;
    Ok(owner == current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn none() -> SharedWith {
        SharedWith::empty()
    }

    #[test]
    fn test_owner_reads_private() {
        assert!(can_read("a", Visibility::Private, "a", &none()).unwrap());
        assert!(!can_read("a", Visibility::Private, "b", &none()).unwrap());
    }

    #[test]
    fn test_public_readable_by_anyone() {
        assert!(can_read("a", Visibility::Public, "b", &none()).unwrap());
    }

    #[test]
    fn test_shared_membership() {
        let shared = SharedWith::new(["b"]).unwrap();
        assert!(can_read("a", Visibility::Shared, "b", &shared).unwrap());
        assert!(!can_read("a", Visibility::Shared, "c", &shared).unwrap());
    }

    #[test]
    fn test_single_letter_ids_do_not_match_substrings() {
        let shared = SharedWith::new(["bob"]).unwrap();
        assert!(!can_read("alice", Visibility::Shared, "b", &shared).unwrap());
    }

    #[test]
    fn test_ids_are_trimmed() {
        assert!(can_read(" a ", Visibility::Private, "a", &none()).unwrap());
        assert!(can_write("a", " a").unwrap());
    }

    #[test]
    fn test_write_is_owner_only() {
        assert!(can_write("a", "a").unwrap());
        assert!(!can_write("a", "b").unwrap());
    }

    #[test]
    fn test_blank_ids_are_errors() {
        assert!(can_read("", Visibility::Public, "b", &none()).is_err());
        assert!(can_read("a", Visibility::Public, "  ", &none()).is_err());
        assert!(can_write("a", "").is_err());
        assert!(can_write(" ", "a").is_err());
    }
}
