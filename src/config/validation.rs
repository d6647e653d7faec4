//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DashboardConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::DashboardConfig;

/// A semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

/// Check the configuration. Returns every problem found.
pub fn validate_config(config: &DashboardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(invalid(
            "listener.bind_address",
            format!("`{}` is not a socket address", config.listener.bind_address),
        ));
    }
    if config.listener.max_connections == 0 {
        errors.push(invalid("listener.max_connections", "must be greater than 0"));
    }
    if let Some(tls) = &config.listener.tls {
        if tls.cert_path.is_empty() {
            errors.push(invalid("listener.tls.cert_path", "must not be empty"));
        }
        if tls.key_path.is_empty() {
            errors.push(invalid("listener.tls.key_path", "must not be empty"));
        }
    }

    if config.dist.root.is_empty() {
        errors.push(invalid("dist.root", "must not be empty"));
    }

    if config.broker.enabled {
        if config.broker.host.is_empty() {
            errors.push(invalid("broker.host", "must not be empty"));
        }
        if config.broker.refresh_interval_ms == 0 {
            errors.push(invalid("broker.refresh_interval_ms", "must be greater than 0"));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(invalid("timeouts.request_secs", "must be greater than 0"));
    }

    if config.observability.log_level.parse::<tracing::Level>().is_err() {
        errors.push(invalid(
            "observability.log_level",
            format!("unknown level `{}`", config.observability.log_level),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(invalid(
            "observability.metrics_address",
            format!("`{}` is not a socket address", config.observability.metrics_address),
        ));
    }

    if config.security.enable_headers
        && axum::http::HeaderValue::from_str(&config.security.content_security_policy).is_err()
    {
        errors.push(invalid(
            "security.content_security_policy",
            "not a valid header value",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TlsConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&DashboardConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = DashboardConfig::default();
        config.listener.bind_address = "localhost".into();
        config.listener.max_connections = 0;
        config.listener.tls = Some(TlsConfig {
            cert_path: String::new(),
            key_path: "key.pem".into(),
        });
        config.timeouts.request_secs = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors
            .iter()
            .map(|ValidationError::InvalidValue { field, .. }| *field)
            .collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "listener.max_connections",
                "listener.tls.cert_path",
                "timeouts.request_secs",
                "observability.log_level",
            ]
        );
    }

    #[test]
    fn test_disabled_broker_skips_broker_checks() {
        let mut config = DashboardConfig::default();
        config.broker.enabled = false;
        config.broker.host = String::new();
        config.broker.refresh_interval_ms = 0;
        assert!(validate_config(&config).is_ok());

        config.broker.enabled = true;
        assert_eq!(validate_config(&config).unwrap_err().len(), 2);
    }

    #[test]
    fn test_metrics_address_checked_when_enabled() {
        let mut config = DashboardConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
