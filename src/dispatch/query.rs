//! # Query Strategy
//!
//! CRUD via declarative query expressions executed store-side. Reads
//! return the fully materialized sequence of matches (possibly empty)
//! rather than a single optional document. Mutations may opt into
//! ignore-errors semantics through configuration, in which case constraint
//! violations are skipped silently; everything else propagates.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::store::{CollectionHandle, Document, Query, QueryOptions, StoreClient};

use super::strategy::{CrudStrategy, OperationResult, Outcome};

/// Configuration for the query execution path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Skip constraint violations during insert/update/delete instead of
    /// surfacing them.
    #[serde(default)]
    pub ignore_errors: bool,

    /// Issue creates as upserts keyed by `_key` instead of plain inserts.
    #[serde(default)]
    pub upsert: bool,
}

impl QueryConfig {
    fn options(&self) -> QueryOptions {
        QueryOptions {
            ignore_errors: self.ignore_errors,
        }
    }
}

/// Declarative execution path.
pub struct QueryStrategy<S: StoreClient> {
    client: Arc<S>,
    config: QueryConfig,
}

impl<S: StoreClient> QueryStrategy<S> {
    pub fn new(client: Arc<S>, config: QueryConfig) -> Self {
        Self { client, config }
    }

    async fn run(&self, collection: &CollectionHandle, query: Query) -> OperationResult<Vec<Document>> {
        debug!(query = query.text(), "executing query");
        Ok(self.client.execute(collection, query).await?)
    }
}

#[async_trait]
impl<S: StoreClient> CrudStrategy for QueryStrategy<S> {
    async fn create(
        &self,
        collection: &CollectionHandle,
        mut body: Document,
    ) -> OperationResult<Outcome> {
        let key = body.key_or_assign();
        let query = if self.config.upsert {
            Query::upsert(collection.name(), body, self.config.options())
        } else {
            Query::insert(collection.name(), body, self.config.options())
        };
        self.run(collection, query).await?;
        info!(key = %key, "document inserted");
        Ok(Outcome::message(format!("Successfully inserted '{}'", key)))
    }

    async fn read(&self, collection: &CollectionHandle, key: &str) -> OperationResult<Outcome> {
        let rows = self
            .run(collection, Query::read_by_key(collection.name(), key))
            .await?;
        info!(key, matches = rows.len(), "documents received");
        let sequence: Vec<Value> = rows.into_iter().map(Document::into_value).collect();
        Ok(Outcome::with_value(
            format!("Successfully received '{}'", key),
            Value::Array(sequence),
        ))
    }

    async fn update(
        &self,
        collection: &CollectionHandle,
        key: &str,
        patch: Document,
    ) -> OperationResult<Outcome> {
        let query = Query::update_by_key(collection.name(), key, patch, self.config.options());
        self.run(collection, query).await?;
        info!(key, "document updated");
        Ok(Outcome::message(format!("Successfully updated '{}'", key)))
    }

    async fn delete(&self, collection: &CollectionHandle, key: &str) -> OperationResult<Outcome> {
        let query = Query::remove_by_key(collection.name(), key, self.config.options());
        self.run(collection, query).await?;
        info!(key, "document removed");
        Ok(Outcome::message(format!("Successfully removed '{}'", key)))
    }
}
