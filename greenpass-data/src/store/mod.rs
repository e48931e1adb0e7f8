//! Datastore client abstraction and the bundled in-memory backend.
//!
//! The data layer talks to exactly one external collaborator: a
//! document-oriented datastore exposing point lookup, structured query
//! execution, and single-document writes. [DatastoreProvider] is the
//! contract; [DatastoreClient] is the cheap-clone handle injected into the
//! query adapter and entity facade.

pub mod memory;

mod query;

pub use query::StructuredQuery;

use std::sync::Arc;

use crate::document::Document;
use crate::errors::DataResult;

/// Contract for implementing a document-oriented datastore backend.
///
/// # Purpose
/// Defines the primitive operations the query adapter and entity facade are
/// built on. A backend stores schema-less documents in named collections,
/// each document identified by a string primary key kept in its `_id` field.
///
/// # Semantics
/// - Collections exist implicitly; the first write to a name creates it.
/// - Every operation is a single independent round trip. No transaction
///   spans more than one document, and no retries happen at this layer.
/// - Connectivity and permission failures surface unchanged to the caller.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; a single client is shared across
/// adapters and facades.
pub trait DatastoreProvider: Send + Sync {
    /// Retrieves a document by its primary key.
    ///
    /// # Returns
    /// `Ok(Some(document))` with the `_id` field populated, or `Ok(None)`
    /// when no document has the key. Absence is never an error here.
    fn lookup(&self, collection: &str, key: &str) -> DataResult<Option<Document>>;

    /// Executes a structured query against a collection.
    ///
    /// The query's membership predicate, if present, is already within the
    /// backend's cardinality limit; chunking oversized predicates is the
    /// query adapter's job, not the backend's.
    ///
    /// # Returns
    /// The matching documents, each carrying its `_id`. No ordering is
    /// guaranteed.
    fn query(&self, collection: &str, query: &StructuredQuery) -> DataResult<Vec<Document>>;

    /// Inserts a new document into a collection.
    ///
    /// Assigns a fresh primary key unless the document already carries one.
    ///
    /// # Returns
    /// The stored document including its `_id`.
    fn insert(&self, collection: &str, document: Document) -> DataResult<Document>;

    /// Merges `patch` into the document with the given key.
    ///
    /// Fields present in the patch replace the stored fields; fields absent
    /// from the patch are untouched.
    ///
    /// # Errors
    /// `NotFound` when no document has the key.
    fn merge(&self, collection: &str, key: &str, patch: &Document) -> DataResult<Document>;

    /// Deletes the document with the given key.
    ///
    /// Idempotent: deleting a nonexistent key succeeds and changes nothing.
    fn delete(&self, collection: &str, key: &str) -> DataResult<()>;
}

/// A handle to a datastore backend.
///
/// `DatastoreClient` wraps any [DatastoreProvider] behind an `Arc`, so it can
/// be cloned freely and shared between the query adapter, entity facades, and
/// tests. The client is always injected explicitly; nothing in this crate
/// holds a process-wide datastore handle.
#[derive(Clone)]
pub struct DatastoreClient {
    inner: Arc<dyn DatastoreProvider>,
}

impl DatastoreClient {
    /// Creates a new client from a backend implementation.
    pub fn new<T: DatastoreProvider + 'static>(inner: T) -> Self {
        DatastoreClient {
            inner: Arc::new(inner),
        }
    }

    /// Creates a client from an already shared backend.
    pub fn from_arc(inner: Arc<dyn DatastoreProvider>) -> Self {
        DatastoreClient { inner }
    }

    /// See [DatastoreProvider::lookup].
    pub fn lookup(&self, collection: &str, key: &str) -> DataResult<Option<Document>> {
        self.inner.lookup(collection, key)
    }

    /// See [DatastoreProvider::query].
    pub fn query(&self, collection: &str, query: &StructuredQuery) -> DataResult<Vec<Document>> {
        self.inner.query(collection, query)
    }

    /// See [DatastoreProvider::insert].
    pub fn insert(&self, collection: &str, document: Document) -> DataResult<Document> {
        self.inner.insert(collection, document)
    }

    /// See [DatastoreProvider::merge].
    pub fn merge(&self, collection: &str, key: &str, patch: &Document) -> DataResult<Document> {
        self.inner.merge(collection, key, patch)
    }

    /// See [DatastoreProvider::delete].
    pub fn delete(&self, collection: &str, key: &str) -> DataResult<()> {
        self.inner.delete(collection, key)
    }
}
