//! # HTTP Server
//!
//! Binds the document routes to a listener. The default wiring serves the
//! in-memory store; any other [`StoreClient`] can be injected for a remote
//! backend.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::GatewayConfig;
use crate::store::{MemoryStore, StoreClient};

use super::config::HttpServerConfig;
use super::routes::{document_routes, GatewayState};

/// HTTP server for the document gateway.
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over the in-memory store.
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_client(config, Arc::new(MemoryStore::new()))
    }

    /// Create a server over a specific store client.
    pub fn with_client<S: StoreClient + 'static>(config: GatewayConfig, client: Arc<S>) -> Self {
        let http = config.http.clone();
        let router = Self::build_router(&http, client, config);
        Self {
            config: http,
            router,
        }
    }

    fn build_router<S: StoreClient + 'static>(
        http: &HttpServerConfig,
        client: Arc<S>,
        config: GatewayConfig,
    ) -> Router {
        let cors = if http.cors_origins.is_empty() {
            // Permissive for development when no origins are configured
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = http
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let state = Arc::new(GatewayState::new(client, config));
        document_routes(state).layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        info!(%addr, "server started");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new(GatewayConfig::default())
    }
}
