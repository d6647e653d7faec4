//! The immutable route table.
//!
//! # Responsibilities
//! - Hold route descriptors in declaration (priority) order
//! - Share one frozen sequence between every holder
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Clones share the underlying sequence; reads never copy
//! - Descriptors are appended only through the builder

use std::sync::Arc;

use crate::routes::descriptor::RouteDescriptor;
use crate::routes::validation::{validate_routes, RouteError};

/// Ordered, immutable sequence of route descriptors.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Arc<[RouteDescriptor]>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// The routes, in match-priority order.
    ///
    /// Every read, through this handle or any clone of it, returns the same
    /// slice.
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.entries
    }

    /// Descriptor declared for exactly `path`, compared literally.
    pub fn get(&self, path: &str) -> Option<&RouteDescriptor> {
        self.entries.iter().find(|r| r.path() == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether two handles share the same underlying table.
    pub fn ptr_eq(&self, other: &RouteTable) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    /// Check every route pattern. Returns all problems found.
    pub fn validate(&self) -> Result<(), Vec<RouteError>> {
        validate_routes(self.routes())
    }
}

/// Collects descriptors before freezing them into a [`RouteTable`].
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    entries: Vec<RouteDescriptor>,
}

impl RouteTableBuilder {
    /// Append a descriptor after all previously added ones.
    pub fn route(mut self, descriptor: RouteDescriptor) -> Self {
        self.entries.push(descriptor);
        self
    }

    pub fn build(self) -> RouteTable {
        RouteTable {
            entries: self.entries.into(),
        }
    }
}
