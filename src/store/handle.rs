//! # Resource Handles
//!
//! Lightweight named references to a database and a collection inside it.
//! Handles are derived fresh for each request by the provisioner, used for
//! the scope of that request, and discarded. They are plain names, not
//! connections, so there is no teardown and no cache.

/// A reference to a named logical database on the storage engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseHandle {
    name: String,
}

impl DatabaseHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A reference to a named collection within a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionHandle {
    database: String,
    name: String,
}

impl CollectionHandle {
    pub fn new(database: &DatabaseHandle, name: impl Into<String>) -> Self {
        Self {
            database: database.name().to_string(),
            name: name.into(),
        }
    }

    /// Name of the database this collection lives in.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
