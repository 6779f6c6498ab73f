//! # In-Memory Store
//!
//! In-process [`StoreClient`] implementation backing the default server
//! wiring and the test suite. Databases map to collections, collections to
//! key-ordered documents; a single lock serializes conflicting writes, so
//! last-write-wins on the same key is the store's behavior, as it would be
//! on a remote backend.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::client::StoreClient;
use super::document::Document;
use super::handle::CollectionHandle;
use super::query::{Query, QueryOp};
use super::{StoreError, StoreResult};

type Collection = BTreeMap<String, Document>;
type DatabaseMap = HashMap<String, HashMap<String, Collection>>;

/// In-memory document store.
pub struct MemoryStore {
    databases: RwLock<DatabaseMap>,
    reachable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            databases: RwLock::new(HashMap::new()),
            reachable: AtomicBool::new(true),
        }
    }

    /// Simulate losing or regaining the backend. While unreachable, every
    /// operation fails with [`StoreError::Unavailable`].
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    fn check_reachable(&self) -> StoreResult<()> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn read_lock(&self) -> StoreResult<RwLockReadGuard<'_, DatabaseMap>> {
        self.databases
            .read()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))
    }

    fn write_lock(&self) -> StoreResult<RwLockWriteGuard<'_, DatabaseMap>> {
        self.databases
            .write()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))
    }

    fn with_collection<T>(
        &self,
        handle: &CollectionHandle,
        f: impl FnOnce(&mut Collection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut databases = self.write_lock()?;
        let collections = databases
            .get_mut(handle.database())
            .ok_or_else(|| StoreError::DatabaseNotFound(handle.database().to_string()))?;
        let collection = collections
            .get_mut(handle.name())
            .ok_or_else(|| StoreError::CollectionNotFound(handle.name().to_string()))?;
        f(collection)
    }

    fn insert_document(
        &self,
        handle: &CollectionHandle,
        mut document: Document,
    ) -> StoreResult<Document> {
        let key = document.key_or_assign();
        self.with_collection(handle, |collection| {
            if collection.contains_key(&key) {
                return Err(StoreError::DuplicateKey(key.clone()));
            }
            collection.insert(key.clone(), document.clone());
            Ok(document)
        })
    }

    fn update_document(
        &self,
        handle: &CollectionHandle,
        key: &str,
        patch: Document,
    ) -> StoreResult<Document> {
        self.with_collection(handle, |collection| {
            let existing = collection
                .get_mut(key)
                .ok_or_else(|| StoreError::DocumentNotFound(key.to_string()))?;
            existing.merge(&patch);
            Ok(existing.clone())
        })
    }

    fn remove_document(&self, handle: &CollectionHandle, key: &str) -> StoreResult<()> {
        self.with_collection(handle, |collection| {
            collection
                .remove(key)
                .map(|_| ())
                .ok_or_else(|| StoreError::DocumentNotFound(key.to_string()))
        })
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn database_exists(&self, name: &str) -> StoreResult<bool> {
        self.check_reachable()?;
        Ok(self.read_lock()?.contains_key(name))
    }

    async fn create_database(&self, name: &str) -> StoreResult<()> {
        self.check_reachable()?;
        let mut databases = self.write_lock()?;
        if databases.contains_key(name) {
            return Err(StoreError::DatabaseExists(name.to_string()));
        }
        databases.insert(name.to_string(), HashMap::new());
        Ok(())
    }

    async fn collection_exists(&self, database: &str, name: &str) -> StoreResult<bool> {
        self.check_reachable()?;
        let databases = self.read_lock()?;
        let collections = databases
            .get(database)
            .ok_or_else(|| StoreError::DatabaseNotFound(database.to_string()))?;
        Ok(collections.contains_key(name))
    }

    async fn create_collection(&self, database: &str, name: &str) -> StoreResult<()> {
        self.check_reachable()?;
        let mut databases = self.write_lock()?;
        let collections = databases
            .get_mut(database)
            .ok_or_else(|| StoreError::DatabaseNotFound(database.to_string()))?;
        if collections.contains_key(name) {
            return Err(StoreError::CollectionExists(name.to_string()));
        }
        collections.insert(name.to_string(), BTreeMap::new());
        Ok(())
    }

    async fn insert(
        &self,
        collection: &CollectionHandle,
        document: Document,
    ) -> StoreResult<Document> {
        self.check_reachable()?;
        self.insert_document(collection, document)
    }

    async fn fetch(&self, collection: &CollectionHandle, key: &str) -> StoreResult<Document> {
        self.check_reachable()?;
        self.with_collection(collection, |docs| {
            docs.get(key)
                .cloned()
                .ok_or_else(|| StoreError::DocumentNotFound(key.to_string()))
        })
    }

    async fn update(
        &self,
        collection: &CollectionHandle,
        key: &str,
        patch: Document,
    ) -> StoreResult<Document> {
        self.check_reachable()?;
        self.update_document(collection, key, patch)
    }

    async fn remove(&self, collection: &CollectionHandle, key: &str) -> StoreResult<()> {
        self.check_reachable()?;
        self.remove_document(collection, key)
    }

    async fn execute(
        &self,
        collection: &CollectionHandle,
        query: Query,
    ) -> StoreResult<Vec<Document>> {
        self.check_reachable()?;
        let options = query.options();
        let result = match query.op().clone() {
            QueryOp::Insert { document } => {
                self.insert_document(collection, document).map(|_| Vec::new())
            }
            QueryOp::Upsert { mut document } => {
                let key = document.key_or_assign();
                // Decision and write under one lock acquisition, so
                // concurrent upserts of the same key cannot both pick the
                // insert branch.
                self.with_collection(collection, |docs| {
                    if let Some(existing) = docs.get_mut(&key) {
                        existing.merge(&document);
                    } else {
                        docs.insert(key.clone(), document);
                    }
                    Ok(Vec::new())
                })
            }
            QueryOp::ReadByKey { key } => self.with_collection(collection, |docs| {
                Ok(docs.get(&key).cloned().into_iter().collect())
            }),
            QueryOp::UpdateByKey { key, patch } => {
                self.update_document(collection, &key, patch).map(|_| Vec::new())
            }
            QueryOp::RemoveByKey { key } => {
                self.remove_document(collection, &key).map(|_| Vec::new())
            }
        };

        match result {
            Err(err) if options.ignore_errors && err.is_constraint_violation() => Ok(Vec::new()),
            other => other,
        }
    }
}
