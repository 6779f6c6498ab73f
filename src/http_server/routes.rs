//! # Document Routes
//!
//! The eight CRUD handlers. Each one provisions the target database and
//! collection fresh, runs the strategy its route selects, and maps the
//! result into the response envelope. Any caught failure, provisioning or
//! operation alike, becomes a 500 with the error text; a missing key is
//! not distinguished from other failures.

use std::fmt::Display;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::error;

use crate::config::GatewayConfig;
use crate::dispatch::{CrudStrategy, DirectStrategy, QueryStrategy};
use crate::provision::{ProvisionResult, Provisioner};
use crate::store::{CollectionHandle, Document, StoreClient};

use super::response::{ErrorResponse, OpResponse};

/// Shared state for the document routes.
pub struct GatewayState<S: StoreClient> {
    client: Arc<S>,
    config: GatewayConfig,
}

impl<S: StoreClient> GatewayState<S> {
    pub fn new(client: Arc<S>, config: GatewayConfig) -> Self {
        Self { client, config }
    }

    /// Ensure the configured database and collection exist, fresh for this
    /// request. Handles are not cached across requests.
    async fn provision(&self) -> ProvisionResult<CollectionHandle> {
        Provisioner::new(&*self.client, self.config.provisioning.policy)
            .provision(&self.config.store.database, &self.config.store.collection)
            .await
    }

    fn direct(&self) -> DirectStrategy<S> {
        DirectStrategy::new(self.client.clone())
    }

    fn query(&self) -> QueryStrategy<S> {
        QueryStrategy::new(self.client.clone(), self.config.query)
    }
}

/// Build the document router.
pub fn document_routes<S: StoreClient + 'static>(state: Arc<GatewayState<S>>) -> Router {
    Router::new()
        .route("/", post(create_direct::<S>))
        .route("/aql", post(create_query::<S>))
        .route(
            "/{key}",
            get(read_direct::<S>)
                .patch(update_direct::<S>)
                .delete(delete_direct::<S>),
        )
        .route(
            "/aql/{key}",
            get(read_query::<S>)
                .patch(update_query::<S>)
                .delete(delete_query::<S>),
        )
        .with_state(state)
}

type HandlerResult = Result<Json<OpResponse>, (StatusCode, Json<ErrorResponse>)>;

/// Map any caught failure to the 500 envelope with its text.
fn failure(err: impl Display) -> (StatusCode, Json<ErrorResponse>) {
    let error = err.to_string();
    error!(%error, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error }),
    )
}

async fn create_direct<S: StoreClient + 'static>(
    State(state): State<Arc<GatewayState<S>>>,
    Json(body): Json<Document>,
) -> HandlerResult {
    let col = state.provision().await.map_err(failure)?;
    let outcome = state.direct().create(&col, body).await.map_err(failure)?;
    Ok(Json(outcome.into()))
}

async fn create_query<S: StoreClient + 'static>(
    State(state): State<Arc<GatewayState<S>>>,
    Json(body): Json<Document>,
) -> HandlerResult {
    let col = state.provision().await.map_err(failure)?;
    let outcome = state.query().create(&col, body).await.map_err(failure)?;
    Ok(Json(outcome.into()))
}

async fn read_direct<S: StoreClient + 'static>(
    State(state): State<Arc<GatewayState<S>>>,
    Path(key): Path<String>,
) -> HandlerResult {
    let col = state.provision().await.map_err(failure)?;
    let outcome = state.direct().read(&col, &key).await.map_err(failure)?;
    Ok(Json(outcome.into()))
}

async fn read_query<S: StoreClient + 'static>(
    State(state): State<Arc<GatewayState<S>>>,
    Path(key): Path<String>,
) -> HandlerResult {
    let col = state.provision().await.map_err(failure)?;
    let outcome = state.query().read(&col, &key).await.map_err(failure)?;
    Ok(Json(outcome.into()))
}

async fn update_direct<S: StoreClient + 'static>(
    State(state): State<Arc<GatewayState<S>>>,
    Path(key): Path<String>,
    Json(patch): Json<Document>,
) -> HandlerResult {
    let col = state.provision().await.map_err(failure)?;
    let outcome = state
        .direct()
        .update(&col, &key, patch)
        .await
        .map_err(failure)?;
    Ok(Json(outcome.into()))
}

async fn update_query<S: StoreClient + 'static>(
    State(state): State<Arc<GatewayState<S>>>,
    Path(key): Path<String>,
    Json(patch): Json<Document>,
) -> HandlerResult {
    let col = state.provision().await.map_err(failure)?;
    let outcome = state
        .query()
        .update(&col, &key, patch)
        .await
        .map_err(failure)?;
    Ok(Json(outcome.into()))
}

async fn delete_direct<S: StoreClient + 'static>(
    State(state): State<Arc<GatewayState<S>>>,
    Path(key): Path<String>,
) -> HandlerResult {
    let col = state.provision().await.map_err(failure)?;
    let outcome = state.direct().delete(&col, &key).await.map_err(failure)?;
    Ok(Json(outcome.into()))
}

async fn delete_query<S: StoreClient + 'static>(
    State(state): State<Arc<GatewayState<S>>>,
    Path(key): Path<String>,
) -> HandlerResult {
    let col = state.provision().await.map_err(failure)?;
    let outcome = state.query().delete(&col, &key).await.map_err(failure)?;
    Ok(Json(outcome.into()))
}
