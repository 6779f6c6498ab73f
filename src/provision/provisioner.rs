//! # Provisioner
//!
//! Idempotent ensure-exists logic for databases and collections.
//!
//! Two policies are supported, both observed in deployed variants of this
//! gateway, selected by configuration rather than picked silently:
//!
//! - **check-then-create**: probe for existence, create only if absent. A
//!   concurrent creator winning the race is tolerated: the resulting
//!   "already exists" from our own create is success.
//! - **create-then-fallback**: create unconditionally; on "already exists"
//!   fall back to an existence probe. Only the already-exists class is
//!   benign — connectivity failures propagate untouched.
//!
//! Either way the post-condition is the same: after a successful call the
//! named resource exists, no matter how many callers raced.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::store::{CollectionHandle, DatabaseHandle, StoreClient, StoreError};

/// Result type for provisioning operations
pub type ProvisionResult<T> = Result<T, ProvisionError>;

/// Fatal provisioning failure.
///
/// Raised when the backing store is unreachable or resource creation fails
/// for a reason other than "already exists". Short-circuits the request
/// before any CRUD dispatch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProvisionError {
    /// Could not ensure the named database exists
    #[error("error creating or receiving database '{name}': {source}")]
    Database {
        name: String,
        #[source]
        source: StoreError,
    },

    /// Could not ensure the named collection exists
    #[error("error creating or receiving collection '{name}': {source}")]
    Collection {
        name: String,
        #[source]
        source: StoreError,
    },
}

/// How the provisioner reconciles "may already exist".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProvisionPolicy {
    /// Probe existence first, create only if absent.
    #[default]
    CheckThenCreate,
    /// Create unconditionally, fall back to a probe on "already exists".
    CreateThenFallback,
}

/// Ensures databases and collections exist before use.
pub struct Provisioner<'a, S: StoreClient + ?Sized> {
    client: &'a S,
    policy: ProvisionPolicy,
}

impl<'a, S: StoreClient + ?Sized> Provisioner<'a, S> {
    pub fn new(client: &'a S, policy: ProvisionPolicy) -> Self {
        Self { client, policy }
    }

    /// Ensure the named database exists and return a handle to it.
    pub async fn ensure_database(&self, name: &str) -> ProvisionResult<DatabaseHandle> {
        let ensured = match self.policy {
            ProvisionPolicy::CheckThenCreate => self.database_check_then_create(name).await,
            ProvisionPolicy::CreateThenFallback => self.database_create_then_fallback(name).await,
        };
        match ensured {
            Ok(()) => Ok(DatabaseHandle::new(name)),
            Err(source) => {
                error!(database = name, %source, "database provisioning failed");
                Err(ProvisionError::Database {
                    name: name.to_string(),
                    source,
                })
            }
        }
    }

    /// Ensure the named collection exists in the database and return a
    /// handle to it.
    pub async fn ensure_collection(
        &self,
        database: &DatabaseHandle,
        name: &str,
    ) -> ProvisionResult<CollectionHandle> {
        let ensured = match self.policy {
            ProvisionPolicy::CheckThenCreate => {
                self.collection_check_then_create(database.name(), name).await
            }
            ProvisionPolicy::CreateThenFallback => {
                self.collection_create_then_fallback(database.name(), name).await
            }
        };
        match ensured {
            Ok(()) => Ok(CollectionHandle::new(database, name)),
            Err(source) => {
                error!(collection = name, %source, "collection provisioning failed");
                Err(ProvisionError::Collection {
                    name: name.to_string(),
                    source,
                })
            }
        }
    }

    /// Ensure database then collection, the per-request entry point.
    pub async fn provision(
        &self,
        database: &str,
        collection: &str,
    ) -> ProvisionResult<CollectionHandle> {
        let db = self.ensure_database(database).await?;
        self.ensure_collection(&db, collection).await
    }

    async fn database_check_then_create(&self, name: &str) -> Result<(), StoreError> {
        if self.client.database_exists(name).await? {
            return Ok(());
        }
        match self.client.create_database(name).await {
            Ok(()) => {
                info!(database = name, "database created");
                Ok(())
            }
            // A concurrent creator won the race between probe and create.
            Err(err) if err.is_already_exists() => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn database_create_then_fallback(&self, name: &str) -> Result<(), StoreError> {
        match self.client.create_database(name).await {
            Ok(()) => {
                info!(database = name, "database created");
                Ok(())
            }
            Err(err) if err.is_already_exists() => {
                if self.client.database_exists(name).await? {
                    Ok(())
                } else {
                    Err(err)
                }
            }
            Err(err) => Err(err),
        }
    }

    async fn collection_check_then_create(
        &self,
        database: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        if self.client.collection_exists(database, name).await? {
            return Ok(());
        }
        match self.client.create_collection(database, name).await {
            Ok(()) => {
                info!(collection = name, "collection created");
                Ok(())
            }
            Err(err) if err.is_already_exists() => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn collection_create_then_fallback(
        &self,
        database: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        match self.client.create_collection(database, name).await {
            Ok(()) => {
                info!(collection = name, "collection created");
                Ok(())
            }
            Err(err) if err.is_already_exists() => {
                if self.client.collection_exists(database, name).await? {
                    Ok(())
                } else {
                    Err(err)
                }
            }
            Err(err) => Err(err),
        }
    }
}
