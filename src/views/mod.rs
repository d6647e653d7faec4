//! View loading subsystem.
//!
//! # Data Flow
//! ```text
//! LazyView::acquire (first navigation)
//!     → ViewLoader::load(id)
//!     → dist.rs (resolve <dist root>/<id>.html, read file)
//!     → ViewDefinition or LoadError
//! ```
//!
//! # Design Decisions
//! - Loaders are async and shared behind `Arc<dyn ViewLoader>`
//! - View ids are relative and confined to the distribution directory

pub mod dist;

use futures_util::future::BoxFuture;

use crate::routes::ViewDefinition;

pub use dist::DistViewLoader;

/// Error produced when a view cannot be acquired.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("view `{id}` not found")]
    NotFound { id: String },

    #[error("invalid view id `{id}`")]
    InvalidId { id: String },

    #[error("failed to read view `{id}`: {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },
}

/// Produces view definitions by id.
pub trait ViewLoader: Send + Sync + std::fmt::Debug {
    fn load<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<ViewDefinition, LoadError>>;
}
