//! Fixture loading.
//!
//! A fixtures document maps collection names to arrays of records:
//!
//! ```json
//! {
//!   "developers": [{"pk": 1, "name": "Guido Rossum"}],
//!   "languages": [{"pk": 1, "name": "Python", "author": 1}]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::store::memory::{MemoryStore, StoreError};

/// Insert every record of `document`. Returns the number inserted.
pub fn seed(store: &MemoryStore, document: &Value) -> Result<usize, StoreError> {
    let collections = document
        .as_object()
        .ok_or_else(|| StoreError::InvalidFixtures("top level must be an object".into()))?;

    let mut inserted = 0;
    for (collection, records) in collections {
        let records = records.as_array().ok_or_else(|| {
            StoreError::InvalidFixtures(format!("`{collection}` must be an array of records"))
        })?;
        for record in records {
            store.insert(collection, record.clone())?;
            inserted += 1;
        }
    }
    Ok(inserted)
}

/// Read a fixtures file and seed `store` with it.
pub fn load_fixtures(store: &MemoryStore, path: &Path) -> Result<usize, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&content)?;
    let inserted = seed(store, &document)?;

    tracing::info!(path = %path.display(), records = inserted, "Loaded fixtures");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_seed_document() {
        let store = MemoryStore::new();
        store.relate("languages", "author", "developers");

        let inserted = seed(
            &store,
            &json!({
                "developers": [{"pk": 1, "name": "Guido Rossum"}],
                "languages": [{"name": "Python", "author": 1}],
            }),
        )
        .unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(store.get("languages", 1).unwrap()["author"], 1);
    }

    #[test]
    fn test_seed_rejects_malformed_documents() {
        let store = MemoryStore::new();
        store.create_collection("developers");

        assert!(matches!(
            seed(&store, &json!([])),
            Err(StoreError::InvalidFixtures(_))
        ));
        assert!(matches!(
            seed(&store, &json!({"developers": {"pk": 1}})),
            Err(StoreError::InvalidFixtures(_))
        ));
        assert!(matches!(
            seed(&store, &json!({"compilers": [{}]})),
            Err(StoreError::UnknownCollection(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let store = MemoryStore::new();
        store.create_collection("developers");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"developers": [{{"name": "Larry Wall"}}]}}"#).unwrap();

        assert_eq!(load_fixtures(&store, file.path()).unwrap(), 1);
        assert_eq!(store.count("developers"), 1);

        let missing = load_fixtures(&store, Path::new("/nonexistent/fixtures.json"));
        assert!(matches!(missing, Err(StoreError::Io { .. })));
    }
}
