//! The capability a resource exposes to the dispatcher.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::lookup::FilterSpec;

/// Serves list and detail operations for one resource.
///
/// The filter handed to both operations already carries every ancestor
/// constraint of the route; detail filters additionally pin `pk`. A detail
/// call must apply the whole filter conjunctively and report
/// [`HandlerError::NotFound`] when no single record satisfies it, whatever the
/// reason.
pub trait ResourceHandler: Send + Sync + fmt::Debug {
    /// Return every record matching `filter`.
    fn list(&self, filter: &FilterSpec) -> Result<Value, HandlerError>;

    /// Return the one record matching `filter`.
    fn detail(&self, filter: &FilterSpec) -> Result<Value, HandlerError>;
}

/// Shared reference to a handler, cloned into every route it serves.
pub type HandlerRef = Arc<dyn ResourceHandler>;

/// Failure reported by a [`ResourceHandler`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("not found")]
    NotFound,

    #[error("handler failed: {0}")]
    Failed(String),
}

/// Named handlers that configuration files refer to by key.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, HandlerRef>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `key`, replacing any previous entry.
    pub fn register(&mut self, key: impl Into<String>, handler: HandlerRef) {
        self.handlers.insert(key.into(), handler);
    }

    pub fn get(&self, key: &str) -> Option<HandlerRef> {
        self.handlers.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed;

    impl ResourceHandler for Fixed {
        fn list(&self, _filter: &FilterSpec) -> Result<Value, HandlerError> {
            Ok(Value::Array(Vec::new()))
        }

        fn detail(&self, _filter: &FilterSpec) -> Result<Value, HandlerError> {
            Err(HandlerError::NotFound)
        }
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = HandlerRegistry::new();
        assert!(registry.is_empty());

        registry.register("developers", Arc::new(Fixed));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("developers").is_some());
        assert!(registry.get("languages").is_none());
    }
}
