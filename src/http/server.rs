//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Mount every route table entry on the Axum router
//! - Serve the JSON API next to the pages
//! - Serve the SPA's built assets from the dist directory
//! - Wire up middleware (tracing, timeout, concurrency limit, request ID)
//! - Serve plain HTTP or TLS until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderMap, routing::get, Router};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::DashboardConfig;
use crate::http::handlers;
use crate::http::headers::apply_security_headers;
use crate::http::request::MakeRequestUuidV4;
use crate::routes::{RouteError, RouteTable};
use crate::streams::StreamDirectory;

/// Paths served by the gateway itself; route table entries may not use them.
const RESERVED_PREFIXES: &[&str] = &["/api", "/health", "/metrics"];

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: RouteTable,
    pub streams: Arc<StreamDirectory>,
}

/// Error building or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid route table: {}", join(.0))]
    InvalidRoutes(Vec<RouteError>),

    #[error("route `{0}` collides with a gateway endpoint")]
    ReservedPath(String),

    #[error("invalid security header: {0}")]
    InvalidHeader(#[from] axum::http::header::InvalidHeaderValue),
}

fn join(errors: &[RouteError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_reserved(path: &str) -> bool {
    RESERVED_PREFIXES.iter().any(|prefix| {
        path == *prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// HTTP server for the dashboard.
pub struct HttpServer {
    router: Router,
    config: DashboardConfig,
}

impl HttpServer {
    /// Create a server for `routes`.
    ///
    /// Fails if the table does not validate or claims a gateway path.
    pub fn new(
        config: DashboardConfig,
        routes: RouteTable,
        streams: Arc<StreamDirectory>,
    ) -> Result<Self, ServerError> {
        routes.validate().map_err(ServerError::InvalidRoutes)?;
        if let Some(route) = routes.routes().iter().find(|r| is_reserved(r.path())) {
            return Err(ServerError::ReservedPath(route.path().to_string()));
        }

        tracing::info!(routes = routes.len(), "Route table accepted");
        let state = AppState { routes, streams };
        let router = Self::build_router(&config, state)?;
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &DashboardConfig, state: AppState) -> Result<Router, ServerError> {
        let mut pages = Router::new();
        for route in state.routes.routes() {
            tracing::debug!(path = %route.path(), view = %route.component().id(), "Mounting route");
            let route = route.clone();
            let path = route.path().to_string();
            pages = pages.route(
                &path,
                get(move |headers: HeaderMap| handlers::serve_view(route.clone(), headers)),
            );
        }
        // Anything that is neither a page nor the API is a built asset
        let pages = pages.fallback_service(ServeDir::new(&config.dist.root));
        let pages = apply_security_headers(pages, &config.security)?;

        let api = Router::new()
            .route("/api/routes", get(handlers::list_routes))
            .route("/api/streams", get(handlers::list_streams))
            .route("/health", get(handlers::health))
            .with_state(state);

        Ok(api
            .merge(pages)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_connections))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4)))
    }

    /// Serve plain HTTP on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS on `listener` until `shutdown` fires.
    ///
    /// In-flight requests get `timeouts.shutdown_grace_secs` to finish.
    pub async fn run_tls(
        self,
        listener: std::net::TcpListener,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTPS server starting");

        let handle = axum_server::Handle::new();
        let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received");
            shutdown_handle.graceful_shutdown(Some(grace));
        });

        axum_server::from_tcp_rustls(listener, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_paths() {
        assert!(is_reserved("/api"));
        assert!(is_reserved("/api/routes"));
        assert!(is_reserved("/health"));
        assert!(is_reserved("/metrics/{*rest}"));
        assert!(!is_reserved("/"));
        assert!(!is_reserved("/apiary"));
        assert!(!is_reserved("/healthz"));
    }
}
