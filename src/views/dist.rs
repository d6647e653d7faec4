//! Views read from the built SPA distribution directory.

use std::path::{Component, Path, PathBuf};

use futures_util::future::BoxFuture;

use crate::routes::ViewDefinition;
use crate::views::{LoadError, ViewLoader};

/// File extension of built views.
const VIEW_EXTENSION: &str = "html";

/// Loads `<root>/<id>.html`.
#[derive(Debug, Clone)]
pub struct DistViewLoader {
    root: PathBuf,
}

impl DistViewLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a view id to its file, rejecting ids that escape the root.
    fn resolve(&self, id: &str) -> Result<PathBuf, LoadError> {
        let relative = Path::new(id);
        let confined = !id.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !confined {
            return Err(LoadError::InvalidId { id: id.to_string() });
        }
        Ok(self.root.join(relative).with_extension(VIEW_EXTENSION))
    }
}

impl ViewLoader for DistViewLoader {
    fn load<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<ViewDefinition, LoadError>> {
        Box::pin(async move {
            let path = self.resolve(id)?;
            tracing::debug!(view = %id, path = ?path, "Reading view");

            match tokio::fs::read_to_string(&path).await {
                Ok(markup) => Ok(ViewDefinition::new(id, markup)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    Err(LoadError::NotFound { id: id.to_string() })
                }
                Err(e) => Err(LoadError::Io {
                    id: id.to_string(),
                    source: e,
                }),
            }
        })
    }
}
