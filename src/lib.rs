//! Clear Linux Elastic Inference dashboard gateway.
//!
//! Declares the dashboard's route table and serves it: each route's view
//! is loaded from the built SPA on first navigation, next to a small JSON
//! API listing the routes and the inference streams on the broker.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routes;
pub mod streams;
pub mod views;

pub use config::DashboardConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routes::{dashboard_routes, RouteDescriptor, RouteMeta, RouteTable};
