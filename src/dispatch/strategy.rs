//! # Strategy Contract
//!
//! The per-operation interface both execution paths implement, the outcome
//! they produce, and the error they surface.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::store::{CollectionHandle, Document, StoreError};

/// Result type for dispatched operations
pub type OperationResult<T> = Result<T, OperationError>;

/// The store rejected a CRUD call.
///
/// Surfaced verbatim to the caller with the store-provided message, never
/// retried. There is no structured code on the wire; the contract is
/// text-only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct OperationError(#[from] pub StoreError);

/// Successful outcome of one dispatched operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Human-readable success message.
    pub message: String,
    /// Payload, when the operation returns one: the document for a direct
    /// read, the materialized sequence for a query read.
    pub value: Option<Value>,
}

impl Outcome {
    /// Outcome with a message and no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            value: None,
        }
    }

    /// Outcome carrying a payload.
    pub fn with_value(message: impl Into<String>, value: Value) -> Self {
        Self {
            message: message.into(),
            value: Some(value),
        }
    }
}

/// One execution path over the four logical CRUD operations.
///
/// Each call runs statelessly against the collection handle provisioned
/// for the current request; a single attempt, with failure terminal for
/// that request.
#[async_trait]
pub trait CrudStrategy: Send + Sync {
    /// Store a new document built from the request body.
    async fn create(
        &self,
        collection: &CollectionHandle,
        body: Document,
    ) -> OperationResult<Outcome>;

    /// Look up by key.
    async fn read(&self, collection: &CollectionHandle, key: &str) -> OperationResult<Outcome>;

    /// Merge the patch fields into the document with the given key.
    async fn update(
        &self,
        collection: &CollectionHandle,
        key: &str,
        patch: Document,
    ) -> OperationResult<Outcome>;

    /// Remove by key.
    async fn delete(&self, collection: &CollectionHandle, key: &str) -> OperationResult<Outcome>;
}
