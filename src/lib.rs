//! docgate - HTTP gateway for document-store CRUD
//!
//! Dual-path CRUD over a document-oriented store: every operation is
//! reachable through direct key-addressed access and through a declarative
//! query expression, with idempotent provisioning of the target database
//! and collection on every request.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod http_server;
pub mod provision;
pub mod store;
