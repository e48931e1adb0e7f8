use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use greenpass_data::document::Document;
use greenpass_data::errors::DataResult;
use greenpass_data::store::memory::InMemoryDatastore;
use greenpass_data::store::{DatastoreClient, DatastoreProvider, StructuredQuery};

/// A datastore decorator that counts backend round trips.
///
/// Wraps the in-memory store and increments a counter per operation kind, so
/// tests can assert how many queries a chunked fan-out issued or that the
/// primary-key shorthand skipped the query surface entirely.
#[derive(Clone)]
pub struct CountingDatastore {
    inner: InMemoryDatastore,
    lookups: Arc<AtomicUsize>,
    queries: Arc<AtomicUsize>,
}

impl CountingDatastore {
    pub fn new(inner: InMemoryDatastore) -> Self {
        CountingDatastore {
            inner,
            lookups: Arc::new(AtomicUsize::new(0)),
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of point lookups issued so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Number of structured queries issued so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.lookups.store(0, Ordering::SeqCst);
        self.queries.store(0, Ordering::SeqCst);
    }
}

impl DatastoreProvider for CountingDatastore {
    fn lookup(&self, collection: &str, key: &str) -> DataResult<Option<Document>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(collection, key)
    }

    fn query(&self, collection: &str, query: &StructuredQuery) -> DataResult<Vec<Document>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.query(collection, query)
    }

    fn insert(&self, collection: &str, document: Document) -> DataResult<Document> {
        self.inner.insert(collection, document)
    }

    fn merge(&self, collection: &str, key: &str, patch: &Document) -> DataResult<Document> {
        self.inner.merge(collection, key, patch)
    }

    fn delete(&self, collection: &str, key: &str) -> DataResult<()> {
        self.inner.delete(collection, key)
    }
}

/// Creates a counting datastore over a fresh in-memory store, along with a
/// client talking to it.
pub fn counting_client() -> (CountingDatastore, DatastoreClient) {
    let counting = CountingDatastore::new(InMemoryDatastore::new());
    let client = DatastoreClient::new(counting.clone());
    (counting, client)
}

/// Sorted primary keys of a result set, for order-independent assertions.
pub fn sorted_ids(documents: &[Document]) -> Vec<String> {
    let mut ids: Vec<String> = documents.iter().filter_map(|d| d.id()).collect();
    ids.sort();
    ids
}
