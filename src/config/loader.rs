//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{BrokerConfig, DashboardConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse configuration from TOML text. Does not validate.
pub fn parse_config(content: &str) -> Result<DashboardConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Read configuration from `path`, or defaults when no file is given.
///
/// Does not apply the environment or validate; see [`finalize`].
pub fn read_config(path: Option<&Path>) -> Result<DashboardConfig, ConfigError> {
    match path {
        Some(path) => parse_config(&fs::read_to_string(path)?),
        None => Ok(DashboardConfig::default()),
    }
}

/// Apply the process environment and validate.
pub fn finalize(mut config: DashboardConfig) -> Result<DashboardConfig, ConfigError> {
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Override broker settings from `STREAM_BROKER_HOST` / `STREAM_BROKER_PORT`.
///
/// A missing variable keeps the configured value and is logged.
pub fn apply_env_overrides<F>(config: &mut DashboardConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(BrokerConfig::HOST_ENV) {
        Some(host) => config.broker.host = host,
        None => tracing::warn!(
            key = BrokerConfig::HOST_ENV,
            default = %config.broker.host,
            "Could not find key in environment, using configured value"
        ),
    }

    match lookup(BrokerConfig::PORT_ENV) {
        Some(port) => {
            config.broker.port = port.trim().parse().map_err(|_| {
                ConfigError::Validation(vec![ValidationError::InvalidValue {
                    field: BrokerConfig::PORT_ENV,
                    reason: format!("`{}` is not a port number", port),
                }])
            })?;
        }
        None => tracing::warn!(
            key = BrokerConfig::PORT_ENV,
            default = config.broker.port,
            "Could not find key in environment, using configured value"
        ),
    }

    Ok(())
}
