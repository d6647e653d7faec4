//! Security response headers for dashboard pages.

use axum::http::header::{CONTENT_SECURITY_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::SecurityConfig;

/// Add the configured security headers to every response of `router`.
///
/// Returns `router` unchanged when headers are disabled.
pub fn apply_security_headers<S>(
    router: Router<S>,
    config: &SecurityConfig,
) -> Result<Router<S>, InvalidHeaderValue>
where
    S: Clone + Send + Sync + 'static,
{
    if !config.enable_headers {
        return Ok(router);
    }

    let csp = HeaderValue::from_str(&config.content_security_policy)?;
    Ok(router
        .layer(SetResponseHeaderLayer::overriding(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(CONTENT_SECURITY_POLICY, csp)))
}
