//! Resource handlers backed by the in-memory store.

use std::sync::Arc;

use serde_json::Value;

use crate::config::ResourceConfig;
use crate::lookup::FilterSpec;
use crate::resource::{HandlerError, HandlerRegistry, ResourceHandler};
use crate::store::memory::{MemoryStore, Record, StoreError};

/// Serves one collection of a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct CollectionHandler {
    store: Arc<MemoryStore>,
    collection: String,
}

impl CollectionHandler {
    pub fn new(store: Arc<MemoryStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn query(&self, filter: &FilterSpec) -> Result<Vec<Record>, HandlerError> {
        self.store
            .filter(&self.collection, filter)
            .map_err(|e: StoreError| HandlerError::Failed(e.to_string()))
    }
}

impl ResourceHandler for CollectionHandler {
    fn list(&self, filter: &FilterSpec) -> Result<Value, HandlerError> {
        let records = self.query(filter)?;
        Ok(Value::Array(records.into_iter().map(Value::Object).collect()))
    }

    fn detail(&self, filter: &FilterSpec) -> Result<Value, HandlerError> {
        let mut records = self.query(filter)?;
        match records.len() {
            0 => Err(HandlerError::NotFound),
            1 => Ok(Value::Object(records.remove(0))),
            n => Err(HandlerError::Failed(format!(
                "{n} records in `{}` match {filter}",
                self.collection
            ))),
        }
    }
}

/// Declare the collections and parent relations a resource tree implies,
/// and register one [`CollectionHandler`] per handler key.
///
/// A child's `parent_field_lookup` field is taken to hold a pk of its
/// parent's collection.
pub fn register_resources(store: &Arc<MemoryStore>, resources: &[ResourceConfig]) -> HandlerRegistry {
    declare_relations(store, resources);
    collection_handlers(store, resources)
}

/// One [`CollectionHandler`] per handler key. Leaves the store untouched.
pub fn collection_handlers(store: &Arc<MemoryStore>, resources: &[ResourceConfig]) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    let mut pending: Vec<&ResourceConfig> = resources.iter().collect();
    while let Some(resource) = pending.pop() {
        let collection = resource.handler_key();
        if registry.get(collection).is_none() {
            registry.register(
                collection,
                Arc::new(CollectionHandler::new(store.clone(), collection)),
            );
        }
        pending.extend(&resource.children);
    }
    registry
}

/// Create every collection of the tree and relate each child to its parent.
pub fn declare_relations(store: &MemoryStore, resources: &[ResourceConfig]) {
    for resource in resources {
        declare_subtree(store, resource, None);
    }
}

fn declare_subtree(store: &MemoryStore, resource: &ResourceConfig, parent_collection: Option<&str>) {
    let collection = resource.handler_key();
    store.create_collection(collection);

    if let (Some(parent), Some(lookup)) = (parent_collection, resource.parent_field_lookup.as_deref()) {
        store.relate(collection, lookup, parent);
    }

    for child in &resource.children {
        declare_subtree(store, child, Some(collection));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::FieldPath;
    use serde_json::json;

    fn handler() -> CollectionHandler {
        let store = Arc::new(MemoryStore::new());
        store.relate("languages", "author", "developers");
        store.insert("developers", json!({"name": "Guido Rossum"})).unwrap();
        store
            .insert("languages", json!({"name": "Python", "author": 1}))
            .unwrap();
        store
            .insert("languages", json!({"name": "ABC", "author": 1}))
            .unwrap();
        CollectionHandler::new(store, "languages")
    }

    #[test]
    fn test_list_returns_matching_records() {
        let filter = FilterSpec::new().and(FieldPath::new("author"), "1");
        let listed = handler().list(&filter).unwrap();
        assert_eq!(listed.as_array().unwrap().len(), 2);

        let filter = FilterSpec::new().and(FieldPath::new("author"), "2");
        assert_eq!(handler().list(&filter).unwrap(), json!([]));
    }

    #[test]
    fn test_detail_requires_exactly_one() {
        let filter = FilterSpec::new()
            .and(FieldPath::new("author"), "1")
            .and(FieldPath::new("pk"), "2");
        assert_eq!(handler().detail(&filter).unwrap()["name"], "ABC");

        let filter = FilterSpec::new()
            .and(FieldPath::new("author"), "2")
            .and(FieldPath::new("pk"), "2");
        assert_eq!(handler().detail(&filter).unwrap_err(), HandlerError::NotFound);

        let ambiguous = FilterSpec::new().and(FieldPath::new("author"), "1");
        assert!(matches!(
            handler().detail(&ambiguous),
            Err(HandlerError::Failed(_))
        ));
    }

    #[test]
    fn test_register_resources_declares_relations() {
        let config: ResourceConfig = toml::from_str(
            r#"
            name = "developer"
            path_segment = "developers"

            [[children]]
            name = "language"
            path_segment = "languages"
            parent_field_lookup = "author"
            "#,
        )
        .unwrap();

        let store = Arc::new(MemoryStore::new());
        let registry = register_resources(&store, &[config]);

        assert_eq!(registry.len(), 2);
        assert!(store.has_collection("developers"));
        store.insert("developers", json!({})).unwrap();
        store.insert("languages", json!({"author": 1})).unwrap();

        let filter = FilterSpec::new().and(FieldPath::parse("author__pk"), "1");
        assert_eq!(store.filter("languages", &filter).unwrap().len(), 1);
    }

    #[test]
    fn test_collection_handlers_leave_store_untouched() {
        let config: ResourceConfig = toml::from_str(
            r#"
            name = "developer"
            path_segment = "developers"

            [[children]]
            name = "language"
            path_segment = "languages"
            parent_field_lookup = "author"
            "#,
        )
        .unwrap();

        let store = Arc::new(MemoryStore::new());
        let registry = collection_handlers(&store, std::slice::from_ref(&config));
        assert_eq!(registry.len(), 2);
        assert!(!store.has_collection("languages"));

        declare_relations(&store, &[config]);
        assert!(store.has_collection("languages"));
    }
}
