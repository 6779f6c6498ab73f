//! # Direct Strategy
//!
//! CRUD via key-addressed document operations. Any failure from the store
//! propagates; this path never silently ignores errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::store::{CollectionHandle, Document, StoreClient};

use super::strategy::{CrudStrategy, OperationResult, Outcome};

/// Key-addressed execution path.
pub struct DirectStrategy<S: StoreClient> {
    client: Arc<S>,
}

impl<S: StoreClient> DirectStrategy<S> {
    pub fn new(client: Arc<S>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<S: StoreClient> CrudStrategy for DirectStrategy<S> {
    async fn create(
        &self,
        collection: &CollectionHandle,
        body: Document,
    ) -> OperationResult<Outcome> {
        let stored = self.client.insert(collection, body).await?;
        let key = stored.key().unwrap_or_default();
        info!(key, "document inserted");
        Ok(Outcome::message(format!("Successfully inserted '{}'", key)))
    }

    async fn read(&self, collection: &CollectionHandle, key: &str) -> OperationResult<Outcome> {
        let document = self.client.fetch(collection, key).await?;
        info!(key, "document received");
        Ok(Outcome::with_value(
            format!("Successfully received '{}'", key),
            document.into_value(),
        ))
    }

    async fn update(
        &self,
        collection: &CollectionHandle,
        key: &str,
        patch: Document,
    ) -> OperationResult<Outcome> {
        self.client.update(collection, key, patch).await?;
        info!(key, "document updated");
        Ok(Outcome::message(format!("Successfully updated '{}'", key)))
    }

    async fn delete(&self, collection: &CollectionHandle, key: &str) -> OperationResult<Outcome> {
        self.client.remove(collection, key).await?;
        info!(key, "document removed");
        Ok(Outcome::message(format!("Successfully removed '{}'", key)))
    }
}
