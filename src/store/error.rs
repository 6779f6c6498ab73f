//! # Store Errors
//!
//! Error taxonomy for the storage backend seam.
//!
//! The gateway surfaces these verbatim as text; the structured variants
//! exist so the provisioner can tell "already exists" apart from genuine
//! failures, and so ignore-errors query semantics can skip constraint
//! violations without masking connectivity loss.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors reported by the storage backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Database creation raced or repeated
    #[error("database '{0}' already exists")]
    DatabaseExists(String),

    /// Collection creation raced or repeated
    #[error("collection '{0}' already exists")]
    CollectionExists(String),

    /// Insert collided with an existing document key
    #[error("unique constraint violated on key '{0}'")]
    DuplicateKey(String),

    /// Named database does not exist
    #[error("database '{0}' not found")]
    DatabaseNotFound(String),

    /// Named collection does not exist
    #[error("collection '{0}' not found")]
    CollectionNotFound(String),

    /// No document with the given key
    #[error("document '{0}' not found")]
    DocumentNotFound(String),

    /// The backend could not be reached at all
    #[error("store unreachable: {0}")]
    Unavailable(String),

    /// The backend is in a broken internal state
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// True for the benign "somebody else created it first" class.
    ///
    /// The create-then-fallback provisioning policy treats exactly this
    /// class as non-fatal; everything else, in particular
    /// [`StoreError::Unavailable`], must propagate.
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            StoreError::DatabaseExists(_) | StoreError::CollectionExists(_)
        )
    }

    /// True for constraint violations that ignore-errors query options
    /// may silently skip: duplicate keys and missing documents.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateKey(_) | StoreError::DocumentNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_classification() {
        assert!(StoreError::DatabaseExists("myDatabase".into()).is_already_exists());
        assert!(StoreError::CollectionExists("myCollection".into()).is_already_exists());
        assert!(!StoreError::DuplicateKey("dhbw".into()).is_already_exists());
    }

    #[test]
    fn test_unavailable_never_classified_benign() {
        let err = StoreError::Unavailable("connection refused".into());
        assert!(!err.is_already_exists());
        assert!(!err.is_constraint_violation());
    }

    #[test]
    fn test_internal_never_classified_benign() {
        let err = StoreError::Internal("lock poisoned".into());
        assert!(!err.is_already_exists());
        assert!(!err.is_constraint_violation());
    }

    #[test]
    fn test_constraint_violation_classification() {
        assert!(StoreError::DuplicateKey("dhbw".into()).is_constraint_violation());
        assert!(StoreError::DocumentNotFound("dhbw".into()).is_constraint_violation());
        assert!(!StoreError::CollectionNotFound("myCollection".into()).is_constraint_violation());
    }
}
