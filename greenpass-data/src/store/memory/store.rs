use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::common::DOC_ID;
use crate::document::Document;
use crate::errors::{DataError, DataResult, ErrorKind};
use crate::store::{DatastoreProvider, StructuredQuery};

type CollectionMap = Arc<RwLock<BTreeMap<String, Document>>>;

/// In-memory datastore backend.
///
/// # Purpose
/// `InMemoryDatastore` keeps every collection entirely in memory. It backs
/// tests and serves as the crate's bundled backend; adapters for remote
/// document stores implement the same [DatastoreProvider] contract.
///
/// # Characteristics
/// - **Thread-Safe**: a concurrent map of collections, each guarded by its
///   own lock; the store can be cloned and shared across threads
/// - **Implicit Collections**: the first write to a name creates the
///   collection
/// - **Deterministic Scans**: documents are kept ordered by primary key, so
///   query results are stable across runs
/// - **Key Assignment**: inserts without an `_id` receive a UUID v4 key
///
/// # Usage
/// ```text
/// let client = DatastoreClient::new(InMemoryDatastore::new());
/// let stored = client.insert("users", doc! { name: "Alice" })?;
/// ```
#[derive(Clone, Default)]
pub struct InMemoryDatastore {
    collections: Arc<DashMap<String, CollectionMap>>,
}

impl InMemoryDatastore {
    /// Creates a new, empty datastore.
    pub fn new() -> Self {
        InMemoryDatastore {
            collections: Arc::new(DashMap::new()),
        }
    }

    /// Returns the number of documents currently in a collection.
    ///
    /// A collection that has never been written to has zero documents.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|map| map.read().len())
            .unwrap_or(0)
    }

    /// Removes every document from a collection.
    pub fn clear(&self, collection: &str) {
        if let Some(map) = self.collections.get(collection) {
            map.write().clear();
        }
    }

    fn collection(&self, name: &str) -> CollectionMap {
        self.collections
            .entry(name.to_string())
            .or_default()
            .clone()
    }
}

impl DatastoreProvider for InMemoryDatastore {
    fn lookup(&self, collection: &str, key: &str) -> DataResult<Option<Document>> {
        let map = self.collection(collection);
        let guard = map.read();
        Ok(guard.get(key).cloned())
    }

    fn query(&self, collection: &str, query: &StructuredQuery) -> DataResult<Vec<Document>> {
        let map = self.collection(collection);
        let guard = map.read();
        let mut results = Vec::new();
        for document in guard.values() {
            if query.matches(document) {
                results.push(document.clone());
                if let Some(limit) = query.limit() {
                    if results.len() >= limit {
                        break;
                    }
                }
            }
        }
        Ok(results)
    }

    fn insert(&self, collection: &str, document: Document) -> DataResult<Document> {
        let mut document = document;
        let key = match document.id() {
            Some(key) => key,
            None => {
                let key = Uuid::new_v4().to_string();
                document.put(DOC_ID, key.as_str())?;
                key
            }
        };

        let map = self.collection(collection);
        let mut guard = map.write();
        log::debug!(
            "inserting document with key {} into collection {}",
            key,
            collection
        );
        guard.insert(key, document.clone());
        Ok(document)
    }

    fn merge(&self, collection: &str, key: &str, patch: &Document) -> DataResult<Document> {
        let map = self.collection(collection);
        let mut guard = map.write();
        match guard.get_mut(key) {
            Some(existing) => {
                existing.merge(patch);
                Ok(existing.clone())
            }
            None => {
                log::error!(
                    "cannot merge into missing document {} in collection {}",
                    key,
                    collection
                );
                Err(DataError::new(
                    &format!("document {} not found in collection {}", key, collection),
                    ErrorKind::NotFound,
                ))
            }
        }
    }

    fn delete(&self, collection: &str, key: &str) -> DataResult<()> {
        let map = self.collection(collection);
        let mut guard = map.write();
        // idempotent: deleting an absent key is not an error
        guard.remove(key);
        Ok(())
    }
}
