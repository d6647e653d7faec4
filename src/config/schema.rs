//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! dashboard gateway. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the dashboard gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Built SPA distribution.
    pub dist: DistConfig,

    /// Redis stream broker.
    pub broker: BrokerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Response hardening.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,

    /// Maximum concurrent in-flight requests (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            tls: None,
            max_connections: 1_000,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Location of the built single page application.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DistConfig {
    /// Directory views are loaded from (`<root>/<view id>.html`).
    pub root: String,
}

impl Default for DistConfig {
    fn default() -> Self {
        Self {
            root: "/dist".to_string(),
        }
    }
}

/// Stream broker connection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Track streams published on the broker.
    pub enabled: bool,

    /// Redis host.
    pub host: String,

    /// Redis port.
    pub port: u16,

    /// Interval between stream list refreshes in milliseconds.
    pub refresh_interval_ms: u64,
}

impl BrokerConfig {
    /// Environment variable overriding `host`.
    pub const HOST_ENV: &'static str = "STREAM_BROKER_HOST";
    /// Environment variable overriding `port`.
    pub const PORT_ENV: &'static str = "STREAM_BROKER_PORT";

    /// Redis connection URL.
    pub fn url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 6379,
            refresh_interval_ms: 1000,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Grace period for in-flight requests on shutdown, in seconds.
    pub shutdown_grace_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            shutdown_grace_secs: 10,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output for development.
    #[default]
    Pretty,
    /// One JSON object per event for production.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Add security headers to page responses.
    pub enable_headers: bool,

    /// Value of the Content-Security-Policy header.
    pub content_security_policy: String,
}

/// Permissive policy the dashboard needs for inline scripts, blob frames
/// and websocket streams from other hosts.
pub const DEFAULT_CONTENT_SECURITY_POLICY: &str = "default-src * 'unsafe-inline' 'unsafe-eval'; \
script-src * 'unsafe-inline' 'unsafe-eval'; \
connect-src * 'unsafe-inline'; \
img-src * data: blob: 'unsafe-inline'; \
frame-src *; \
style-src * 'unsafe-inline';";

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            content_security_policy: DEFAULT_CONTENT_SECURITY_POLICY.to_string(),
        }
    }
}
