//! In-memory record store.
//!
//! # Responsibilities
//! - Hold named collections of JSON object records keyed by integer `pk`
//! - Know which fields are relations to which collection
//! - Apply a `FilterSpec`, following relations for chained fields
//!
//! # Design Decisions
//! - Concurrent readers via `DashMap`; a filter snapshots the collection
//!   before walking relations so no shard guard is held across lookups
//! - Captured values are strings; numeric fields compare numerically so
//!   `/developers/01/` finds pk 1
//! - A dangling relation simply fails the constraint (zero rows)

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use dashmap::DashMap;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::lookup::{Constraint, FilterSpec};
use crate::routing::PK_CAPTURE;

/// A stored record: a JSON object that always carries `pk`.
pub type Record = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown collection `{0}`")]
    UnknownCollection(String),

    #[error("collection `{collection}` has no relation `{field}`")]
    UnknownRelation { collection: String, field: String },

    #[error("record for `{collection}` is not a JSON object")]
    NotAnObject { collection: String },

    #[error("record for `{collection}` has a non-integer primary key")]
    InvalidPrimaryKey { collection: String },

    #[error("primary key {pk} already exists in `{collection}`")]
    DuplicatePrimaryKey { collection: String, pk: u64 },

    #[error("invalid fixtures: {0}")]
    InvalidFixtures(String),

    #[error("failed to read fixtures from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixtures: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
struct Collection {
    relations: HashMap<String, String>,
    records: BTreeMap<u64, Record>,
}

impl Collection {
    fn next_pk(&self) -> u64 {
        self.records.keys().next_back().map_or(1, |pk| pk + 1)
    }
}

/// Thread-safe collections of records.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a collection. Existing collections are left untouched.
    pub fn create_collection(&self, name: &str) {
        self.collections.entry(name.to_owned()).or_default();
    }

    /// Declare that `field` on `collection` holds a pk of `target`.
    pub fn relate(&self, collection: &str, field: &str, target: &str) {
        self.create_collection(target);
        self.collections
            .entry(collection.to_owned())
            .or_default()
            .relations
            .insert(field.to_owned(), target.to_owned());
    }

    pub fn has_collection(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Insert a record, assigning the next `pk` when it has none.
    pub fn insert(&self, collection: &str, record: Value) -> Result<u64, StoreError> {
        let Value::Object(mut record) = record else {
            return Err(StoreError::NotAnObject {
                collection: collection.to_owned(),
            });
        };

        let mut entry = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_owned()))?;

        let pk = match record.get(PK_CAPTURE) {
            None => entry.next_pk(),
            Some(value) => as_pk(value).ok_or_else(|| StoreError::InvalidPrimaryKey {
                collection: collection.to_owned(),
            })?,
        };
        if entry.records.contains_key(&pk) {
            return Err(StoreError::DuplicatePrimaryKey {
                collection: collection.to_owned(),
                pk,
            });
        }

        record.insert(PK_CAPTURE.to_owned(), Value::from(pk));
        entry.records.insert(pk, record);
        Ok(pk)
    }

    pub fn get(&self, collection: &str, pk: u64) -> Option<Record> {
        self.collections
            .get(collection)
            .and_then(|c| c.records.get(&pk).cloned())
    }

    /// Number of records in `collection`, zero when it does not exist.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map_or(0, |c| c.records.len())
    }

    /// Records of `collection` satisfying every constraint of `spec`, in pk
    /// order.
    pub fn filter(&self, collection: &str, spec: &FilterSpec) -> Result<Vec<Record>, StoreError> {
        let candidates: Vec<Record> = {
            let entry = self
                .collections
                .get(collection)
                .ok_or_else(|| StoreError::UnknownCollection(collection.to_owned()))?;
            match spec.primary_key().and_then(parse_pk) {
                Some(pk) => entry.records.get(&pk).cloned().into_iter().collect(),
                None => entry.records.values().cloned().collect(),
            }
        };

        let mut matched = Vec::new();
        for record in candidates {
            if spec.try_matches(|c| self.satisfies(collection, &record, c))? {
                matched.push(record);
            }
        }
        Ok(matched)
    }

    fn satisfies(
        &self,
        collection: &str,
        record: &Record,
        constraint: &Constraint,
    ) -> Result<bool, StoreError> {
        let (relations, field) = constraint.field.split_last();
        let mut current_collection = Cow::Borrowed(collection);
        let mut current = Cow::Borrowed(record);

        for relation in relations {
            let target = self.relation_target(&current_collection, relation)?;
            let Some(pk) = current.get(relation.as_str()).and_then(as_pk) else {
                return Ok(false);
            };
            let Some(next) = self.get(&target, pk) else {
                return Ok(false);
            };
            current = Cow::Owned(next);
            current_collection = Cow::Owned(target);
        }

        Ok(current
            .get(field)
            .is_some_and(|value| value_matches(value, &constraint.value)))
    }

    fn relation_target(&self, collection: &str, field: &str) -> Result<String, StoreError> {
        self.collections
            .get(collection)
            .and_then(|c| c.relations.get(field).cloned())
            .ok_or_else(|| StoreError::UnknownRelation {
                collection: collection.to_owned(),
                field: field.to_owned(),
            })
    }
}

fn parse_pk(value: &str) -> Option<u64> {
    value.parse().ok()
}

fn as_pk(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => parse_pk(s),
        _ => None,
    }
}

/// Compare a stored value with a value captured from a path.
fn value_matches(stored: &Value, captured: &str) -> bool {
    match stored {
        Value::String(s) => s == captured,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                captured.parse::<i64>() == Ok(i)
            } else if let Some(u) = n.as_u64() {
                captured.parse::<u64>() == Ok(u)
            } else {
                n.to_string() == captured
            }
        }
        Value::Bool(b) => captured.parse::<bool>() == Ok(*b),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}
