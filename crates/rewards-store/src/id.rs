//! # Receipt ID Generation
//!
//! Receipt IDs are random UUID v4 strings. The source sits behind a trait
//! so tests can script collisions.

use std::fmt::Debug;

use uuid::Uuid;

/// Produces candidate receipt IDs.
///
/// Implementations need not guarantee uniqueness; the receipt store retries
/// on collision.
pub trait IdSource: Send + Sync + Debug {
    /// Returns the next candidate ID. Must be non-empty and contain no
    /// whitespace.
    fn next_id(&self) -> String;
}

/// Random UUID v4 IDs, e.g. `7fb1377b-b223-49d9-a31a-5a02701dd310`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_ids_are_well_formed() {
        let id = UuidIdSource.next_id();
        assert_eq!(id.len(), 36);
        assert!(!id.chars().any(char::is_whitespace));
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_uuid_ids_differ() {
        assert_ne!(UuidIdSource.next_id(), UuidIdSource.next_id());
    }
}
