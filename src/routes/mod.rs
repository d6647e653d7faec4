//! Route table subsystem.
//!
//! # Data Flow
//! ```text
//! Process start (main):
//!     dashboard_routes(loader)
//!     → RouteTableBuilder (append descriptors in priority order)
//!     → Freeze as immutable RouteTable (Arc<[RouteDescriptor]>)
//!     → validate() → handed to the HTTP gateway
//!
//! First navigation to a route:
//!     gateway → descriptor.component().acquire()
//!     → provider.rs (load once, cache)
//!     → views::ViewLoader (read view from dist)
//! ```
//!
//! # Design Decisions
//! - Routes declared once at startup, immutable at runtime
//! - Declaration order is match priority (first match wins)
//! - Views are acquired lazily, never at table construction
//! - Matching is left to the HTTP router; this module only declares

pub mod descriptor;
pub mod provider;
pub mod table;
pub mod validation;

use std::sync::Arc;

use crate::views::ViewLoader;

pub use descriptor::{RouteDescriptor, RouteMeta};
pub use provider::{LazyView, ViewDefinition, ViewProvider};
pub use table::{RouteTable, RouteTableBuilder};
pub use validation::RouteError;

/// Title shown for the dashboard landing page.
pub const INDEX_TITLE: &str = "Clear Linux Elastic Inference Demo";

/// View id of the dashboard landing page.
pub const INDEX_VIEW: &str = "views/index";

/// Declare the dashboard's route table.
///
/// Called once at process start. No view is loaded here; each component is
/// a [`LazyView`] that loads through `loader` on first navigation.
pub fn dashboard_routes(loader: Arc<dyn ViewLoader>) -> RouteTable {
    RouteTable::builder()
        .route(RouteDescriptor::new(
            "/",
            RouteMeta::titled(INDEX_TITLE),
            LazyView::new(INDEX_VIEW, loader),
        ))
        .build()
}
