//! # Store Module
//!
//! Abstraction over the document-oriented storage backend.
//!
//! The backend itself is an external collaborator: this module defines the
//! [`StoreClient`] trait the rest of the gateway talks to, the [`Document`]
//! and handle types that cross that seam, and the declarative [`Query`]
//! representation. [`MemoryStore`] is the in-process implementation used by
//! the default server wiring and by tests.

pub mod client;
pub mod document;
pub mod error;
pub mod handle;
pub mod memory;
pub mod query;

pub use client::StoreClient;
pub use document::Document;
pub use error::{StoreError, StoreResult};
pub use handle::{CollectionHandle, DatabaseHandle};
pub use memory::MemoryStore;
pub use query::{Query, QueryOp, QueryOptions};
