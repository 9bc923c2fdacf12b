//! # Key-value storage — the persistence seam
//!
//! Everything Hydrate keeps across restarts is a handful of string values under
//! fixed keys. [`KeyValueStore`] is the async interface the rest of the app
//! talks to; [`crate::HydrationRepo`] layers the typed schema on top of it.
//!
//! | Method | Semantics |
//! |--------|-----------|
//! | [`get_item`](KeyValueStore::get_item) | `Ok(None)` when the key was never written. |
//! | [`set_item`](KeyValueStore::set_item) | Unconditional upsert. |
//! | [`remove_item`](KeyValueStore::remove_item) | Removing a missing key is not an error. |
//!
//! Implementations live in sibling modules ([`crate::memory`], [`crate::file_store`]).

use thiserror::Error;

/// Errors surfaced by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("storage lock poisoned")]
    Poisoned,

    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Async trait for a string-keyed, string-valued persistent store.
pub trait KeyValueStore {
    fn get_item(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>>;
    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn remove_item(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
}

/// Keys may only contain ASCII alphanumerics, `-` and `_`.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("drinkProgress").is_ok());
        assert!(validate_key("energy-drink_2").is_ok());
        assert!(matches!(validate_key(""), Err(StoreError::InvalidKey(_))));
        assert!(matches!(
            validate_key("../etc/passwd"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(validate_key("a b"), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::InvalidKey("a/b".to_string());
        assert_eq!(err.to_string(), "invalid storage key: \"a/b\"");
        assert_eq!(StoreError::Poisoned.to_string(), "storage lock poisoned");
    }
}
