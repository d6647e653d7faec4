//! Network layer subsystem.
//!
//! The listener itself is a plain Tokio `TcpListener` handed to the HTTP
//! server; this module only prepares optional TLS.

pub mod tls;
