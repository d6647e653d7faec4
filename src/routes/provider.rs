//! Deferred view acquisition.
//!
//! # Responsibilities
//! - Define the capability a route uses to produce its view
//! - Load each view at most once, on first navigation
//!
//! # Design Decisions
//! - Acquisition is async; the router awaits it during navigation
//! - Successful loads are cached for the life of the process
//! - Failed loads are returned to the caller and not cached, so the next
//!   navigation retries

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::OnceCell;

use crate::observability::metrics;
use crate::views::{LoadError, ViewLoader};

/// A loaded, renderable view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDefinition {
    id: String,
    markup: String,
}

impl ViewDefinition {
    pub fn new(id: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            markup: markup.into(),
        }
    }

    /// Identifier the view was loaded under (e.g. `views/index`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Rendered HTML of the view.
    pub fn markup(&self) -> &str {
        &self.markup
    }
}

/// Capability that produces a route's view when the route is navigated to.
///
/// The returned future resolves exactly once, with the view or the reason
/// it could not be acquired.
pub trait ViewProvider: Send + Sync + std::fmt::Debug {
    /// Identifier of the view this provider produces.
    fn id(&self) -> &str;

    /// Acquire the view, loading it if this is the first acquisition.
    fn acquire(&self) -> BoxFuture<'_, Result<Arc<ViewDefinition>, LoadError>>;
}

/// A view loaded through a [`ViewLoader`] on first acquisition.
#[derive(Debug)]
pub struct LazyView {
    id: String,
    loader: Arc<dyn ViewLoader>,
    loaded: OnceCell<Arc<ViewDefinition>>,
}

impl LazyView {
    pub fn new(id: impl Into<String>, loader: Arc<dyn ViewLoader>) -> Self {
        Self {
            id: id.into(),
            loader,
            loaded: OnceCell::new(),
        }
    }

    /// Whether the view has already been loaded.
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }
}

impl ViewProvider for LazyView {
    fn id(&self) -> &str {
        &self.id
    }

    fn acquire(&self) -> BoxFuture<'_, Result<Arc<ViewDefinition>, LoadError>> {
        Box::pin(async move {
            // Concurrent first acquisitions wait on the same initialization.
            let view = self
                .loaded
                .get_or_try_init(|| async {
                    tracing::debug!(view = %self.id, "Loading view");
                    match self.loader.load(&self.id).await {
                        Ok(view) => {
                            metrics::record_view_load(&self.id, true);
                            tracing::info!(view = %self.id, bytes = view.markup().len(), "View loaded");
                            Ok(Arc::new(view))
                        }
                        Err(e) => {
                            metrics::record_view_load(&self.id, false);
                            tracing::error!(view = %self.id, error = %e, "View load failed");
                            Err(e)
                        }
                    }
                })
                .await?;
            Ok(Arc::clone(view))
        })
    }
}
