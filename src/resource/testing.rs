//! Handler doubles for unit tests.

use std::sync::Arc;

use serde_json::Value;

use crate::lookup::FilterSpec;
use crate::resource::handler::{HandlerError, HandlerRef, ResourceHandler};

/// Lists nothing, finds nothing.
#[derive(Debug)]
pub(crate) struct NoopHandler;

impl ResourceHandler for NoopHandler {
    fn list(&self, _filter: &FilterSpec) -> Result<Value, HandlerError> {
        Ok(Value::Array(Vec::new()))
    }

    fn detail(&self, _filter: &FilterSpec) -> Result<Value, HandlerError> {
        Err(HandlerError::NotFound)
    }
}

pub(crate) fn noop() -> HandlerRef {
    Arc::new(NoopHandler)
}
