//! Request handlers.

use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routes::{RouteDescriptor, RouteMeta};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// One route as exposed to page chrome.
#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub path: String,
    pub meta: RouteMeta,
}

#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteSummary>,
}

#[derive(Debug, Serialize)]
pub struct StreamsResponse {
    pub streams: Vec<String>,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Routes in match-priority order with their metadata.
pub async fn list_routes(State(state): State<AppState>) -> Json<RoutesResponse> {
    let start = Instant::now();
    let routes = state
        .routes
        .routes()
        .iter()
        .map(|r| RouteSummary {
            path: r.path().to_string(),
            meta: r.meta().clone(),
        })
        .collect();
    metrics::record_request("/api/routes", 200, start);
    Json(RoutesResponse { routes })
}

/// Streams currently published on the broker.
pub async fn list_streams(State(state): State<AppState>) -> Json<StreamsResponse> {
    let start = Instant::now();
    let streams = state.streams.snapshot().await;
    metrics::record_request("/api/streams", 200, start);
    Json(StreamsResponse { streams })
}

/// Navigate to `route`: acquire its view (loading it on first use) and
/// render it.
pub async fn serve_view(route: RouteDescriptor, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    match route.component().acquire().await {
        Ok(view) => {
            tracing::debug!(
                request_id = %request_id,
                path = %route.path(),
                view = %view.id(),
                "Serving view"
            );
            metrics::record_request(route.path(), 200, start);
            Html(view.markup().to_string()).into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                path = %route.path(),
                view = %route.component().id(),
                error = %e,
                "Navigation failed"
            );
            metrics::record_request(route.path(), 500, start);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load page").into_response()
        }
    }
}
