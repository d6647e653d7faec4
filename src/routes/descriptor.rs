//! Route descriptors: one entry of the route table.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::routes::provider::ViewProvider;

/// Page-level metadata attached to a route.
///
/// Read by page chrome (e.g. the window title); never used for matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteMeta(BTreeMap<String, Value>);

impl RouteMeta {
    /// Metadata key holding the human-readable page title.
    pub const TITLE: &'static str = "title";

    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata carrying only a page title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self::new().with(Self::TITLE, Value::String(title.into()))
    }

    /// Add or replace a metadata entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The page title, if one is set and is a string.
    pub fn title(&self) -> Option<&str> {
        self.get(Self::TITLE).and_then(Value::as_str)
    }
}

/// A URL pattern bound to page metadata and a deferred view.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    path: String,
    meta: RouteMeta,
    component: Arc<dyn ViewProvider>,
}

impl RouteDescriptor {
    /// Create a descriptor. The component is not invoked here.
    pub fn new(
        path: impl Into<String>,
        meta: RouteMeta,
        component: impl ViewProvider + 'static,
    ) -> Self {
        Self::with_provider(path, meta, Arc::new(component))
    }

    /// Create a descriptor from an already shared provider.
    pub fn with_provider(
        path: impl Into<String>,
        meta: RouteMeta,
        component: Arc<dyn ViewProvider>,
    ) -> Self {
        Self {
            path: path.into(),
            meta,
            component,
        }
    }

    /// The route pattern in the HTTP router's syntax.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn meta(&self) -> &RouteMeta {
        &self.meta
    }

    /// The deferred view producer for this route.
    pub fn component(&self) -> &Arc<dyn ViewProvider> {
        &self.component
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_meta_title() {
        let meta = RouteMeta::titled("Dashboard");
        assert_eq!(meta.title(), Some("Dashboard"));

        let untitled = RouteMeta::new().with("requires_auth", true);
        assert_eq!(untitled.title(), None);
        assert_eq!(untitled.get("requires_auth"), Some(&json!(true)));

        // Non-string titles are not treated as titles
        let numeric = RouteMeta::new().with(RouteMeta::TITLE, 42);
        assert_eq!(numeric.title(), None);
    }

    #[test]
    fn test_meta_serializes_as_plain_map() {
        let meta = RouteMeta::titled("Dashboard").with("order", 1);
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value, json!({"order": 1, "title": "Dashboard"}));

        let parsed: RouteMeta = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, meta);
    }
}
