//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs read_config (parse & deserialize, defaults for missing sections)
//!     → loader.rs finalize (STREAM_BROKER_* environment overrides)
//!     → validation.rs (semantic checks)
//!     → DashboardConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart, like the
//!   route table it sits next to
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{finalize, read_config, ConfigError};
pub use schema::{
    BrokerConfig, DashboardConfig, DistConfig, ListenerConfig, LogFormat, ObservabilityConfig,
    SecurityConfig, TimeoutConfig, TlsConfig,
};
pub use validation::ValidationError;
