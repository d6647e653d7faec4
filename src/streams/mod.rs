//! Inference stream directory.
//!
//! # Data Flow
//! ```text
//! Inference services → SADD/SREM "streams" on the Redis broker
//!
//! directory.rs monitor (periodic timer)
//!     → broker.rs (SMEMBERS "streams")
//!     → info.rs (parse name:category:status, drop invalid ids)
//!     → swap current set, log added/removed
//!
//! GET /api/streams → directory snapshot
//! ```
//!
//! # Design Decisions
//! - The gateway only reads the broker; it never registers streams
//! - Broker failures keep the last known set

pub mod broker;
pub mod directory;
pub mod info;

pub use broker::{BrokerError, RedisStreamBroker, StreamBroker};
pub use directory::StreamDirectory;
pub use info::StreamInfo;
