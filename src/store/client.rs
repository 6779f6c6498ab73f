//! # Store Client Trait
//!
//! The seam between the gateway and the storage backend. Everything above
//! this trait (provisioning, CRUD dispatch, HTTP surface) is written against
//! it; [`MemoryStore`](super::MemoryStore) implements it in-process, and a
//! wire client for a remote document store would implement it the same way.

use async_trait::async_trait;

use super::document::Document;
use super::handle::CollectionHandle;
use super::query::Query;
use super::StoreResult;

/// Operations the storage backend must provide.
///
/// Direct-path CRUD goes through the key-addressed methods; the query path
/// goes through [`execute`](StoreClient::execute). Every method is a single
/// round-trip: no retry or backoff happens at this layer.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Whether a database with this name exists.
    async fn database_exists(&self, name: &str) -> StoreResult<bool>;

    /// Create a database. Errors with `DatabaseExists` if it already does.
    async fn create_database(&self, name: &str) -> StoreResult<()>;

    /// Whether a collection with this name exists in the database.
    async fn collection_exists(&self, database: &str, name: &str) -> StoreResult<bool>;

    /// Create a collection. Errors with `CollectionExists` if it already does.
    async fn create_collection(&self, database: &str, name: &str) -> StoreResult<()>;

    /// Insert a document, returning it as stored (with its key populated).
    async fn insert(&self, collection: &CollectionHandle, document: Document)
        -> StoreResult<Document>;

    /// Fetch a document by key.
    async fn fetch(&self, collection: &CollectionHandle, key: &str) -> StoreResult<Document>;

    /// Merge the patch fields into the document with the given key.
    async fn update(
        &self,
        collection: &CollectionHandle,
        key: &str,
        patch: Document,
    ) -> StoreResult<Document>;

    /// Remove a document by key.
    async fn remove(&self, collection: &CollectionHandle, key: &str) -> StoreResult<()>;

    /// Execute a declarative query against the collection.
    ///
    /// The full result sequence is materialized before returning; an empty
    /// sequence is a successful outcome, not an error.
    async fn execute(
        &self,
        collection: &CollectionHandle,
        query: Query,
    ) -> StoreResult<Vec<Document>>;
}
