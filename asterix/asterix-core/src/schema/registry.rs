//! Schema lookup contract and the in-memory registry implementing it.

use std::{collections::HashMap, sync::Arc};

use super::Schema;

/// Resolves the schema of a category.
///
/// Implementations are shared across decode calls (possibly on several
/// threads), so they must be `Send + Sync` and must not hand out mutable
/// schema state.
pub trait SchemaProvider: Send + Sync {
    /// Returns the schema for `category`, or `None` when it is unsupported.
    fn schema(&self, category: u8) -> Option<Arc<Schema>>;
}

impl<T: SchemaProvider + ?Sized> SchemaProvider for Arc<T> {
    fn schema(&self, category: u8) -> Option<Arc<Schema>> {
        (**self).schema(category)
    }
}

impl<T: SchemaProvider + ?Sized> SchemaProvider for &T {
    fn schema(&self, category: u8) -> Option<Arc<Schema>> {
        (**self).schema(category)
    }
}

/// Category → schema map.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<u8, Arc<Schema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `schema` under its category, returning the one it replaces.
    pub fn register(&mut self, schema: impl Into<Arc<Schema>>) -> Option<Arc<Schema>> {
        let schema = schema.into();
        self.schemas.insert(schema.category(), schema)
    }

    pub fn get(&self, category: u8) -> Option<&Arc<Schema>> {
        self.schemas.get(&category)
    }

    pub fn contains(&self, category: u8) -> bool {
        self.schemas.contains_key(&category)
    }

    /// Registered categories in ascending order.
    pub fn categories(&self) -> Vec<u8> {
        let mut categories: Vec<u8> = self.schemas.keys().copied().collect();
        categories.sort_unstable();
        categories
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl SchemaProvider for SchemaRegistry {
    fn schema(&self, category: u8) -> Option<Arc<Schema>> {
        self.schemas.get(&category).cloned()
    }
}

impl FromIterator<Schema> for SchemaRegistry {
    fn from_iter<I: IntoIterator<Item = Schema>>(iter: I) -> Self {
        let mut registry = Self::new();
        for schema in iter {
            registry.register(schema);
        }
        registry
    }
}
