//! # CRUD Dispatch
//!
//! The four logical operations (create, read, update, delete), each
//! implemented twice against the provisioned collection:
//!
//! - [`DirectStrategy`] operates by document key through the store's
//!   document API and never ignores errors.
//! - [`QueryStrategy`] generates a declarative query expression per
//!   operation and may opt into ignore-errors semantics.
//!
//! Exactly one strategy runs per request, selected by route. The paths are
//! independent alternatives, not a combined guarantee; there is no retry
//! and no transaction across them.

pub mod direct;
pub mod query;
pub mod strategy;

pub use direct::DirectStrategy;
pub use query::{QueryConfig, QueryStrategy};
pub use strategy::{CrudStrategy, OperationError, OperationResult, Outcome};
