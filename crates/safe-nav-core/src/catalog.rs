//! Type catalog: the ahead-of-time registry of navigable types.
//!
//! Return shapes name their types; the resolver turns those names into
//! descriptors through the catalog. A name missing here makes any shape
//! mentioning it unsupported.

use std::collections::HashMap;

use safe_nav_types::TypeDescriptor;

use crate::well_known;

/// Registry of descriptors keyed by type name.
#[derive(Debug, Default, Clone)]
pub struct TypeCatalog {
    types: HashMap<String, TypeDescriptor>,
}

impl TypeCatalog {
    /// Create an empty catalog. Most callers want [`with_builtins`](Self::with_builtins).
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the primitive types and the built-in containers.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        for desc in well_known::builtin_types() {
            catalog.register(desc);
        }
        catalog
    }

    /// Register a descriptor, returning the one it replaces, if any.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Option<TypeDescriptor> {
        self.types
            .insert(descriptor.name().to_string(), descriptor)
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }
}
