//! # HTTP Server Module
//!
//! Axum surface for the gateway. Eight routes, one per operation and
//! execution path:
//!
//! - `POST /` / `POST /aql` - create
//! - `GET /{key}` / `GET /aql/{key}` - read
//! - `PATCH /{key}` / `PATCH /aql/{key}` - update
//! - `DELETE /{key}` / `DELETE /aql/{key}` - delete
//!
//! Every response is either `200 {"message", "value"?}` or
//! `500 {"error"}`; no other status codes are produced.

pub mod config;
pub mod response;
pub mod routes;
pub mod server;

pub use config::HttpServerConfig;
pub use response::{ErrorResponse, OpResponse};
pub use routes::{document_routes, GatewayState};
pub use server::HttpServer;
