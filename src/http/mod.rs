//! HTTP gateway subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign/propagate X-Request-ID)
//!     → route table paths → handlers::serve_view (acquire view lazily)
//!                           → headers.rs (security headers)
//!     → /api/routes, /api/streams, /health → handlers.rs (JSON)
//!     → anything else → built asset from the dist directory
//!     → Send to client
//! ```

pub mod handlers;
pub mod headers;
pub mod request;
pub mod server;

pub use request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError};
