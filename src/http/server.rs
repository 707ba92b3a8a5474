//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router funnelling every path into the dispatcher
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - Drain gracefully on shutdown

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::codec::ApiUrls;
use crate::config::ServerConfig;
use crate::http::dispatcher;
use crate::http::handlers::{route_table, Handler};
use crate::http::request::{make_request_span, UuidRequestId};
use crate::routing::{RouteTable, TemplateError};
use crate::store::{ResourceStore, SharedStore};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub routes: Arc<RouteTable<Handler>>,
    pub urls: Arc<ApiUrls>,
    pub api_prefix: Arc<str>,
    pub max_body_size: usize,
}

/// HTTP server for the computer database API.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
    store: SharedStore,
}

impl HttpServer {
    /// Create a new HTTP server serving `store` with the given configuration.
    pub fn new(config: ServerConfig, store: ResourceStore) -> Result<Self, TemplateError> {
        let store = SharedStore::new(store);
        let state = AppState {
            store: store.clone(),
            routes: Arc::new(route_table()?),
            urls: Arc::new(ApiUrls::from_config(&config)),
            api_prefix: Arc::from(config.api.prefix.as_str()),
            max_body_size: config.limits.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            store,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(api_handler))
            .route("/", any(api_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server until the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let companies = self.store.lock().len();
        tracing::info!(
            address = %addr,
            prefix = %self.config.api.prefix,
            companies,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Handle to the store this server mutates.
    pub fn store(&self) -> SharedStore {
        self.store.clone()
    }
}

/// Every request, whatever its path, goes through the dispatcher.
async fn api_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    dispatcher::dispatch(&state, request).await
}
