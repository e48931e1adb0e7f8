use std::fmt::{Debug, Formatter};

use crate::config::AdapterConfig;
use crate::document::Document;
use crate::errors::DataResult;
use crate::filter::FilterSpec;
use crate::query::{QueryAdapter, QueryOptions};
use crate::store::DatastoreClient;

use super::Processor;

/// Per-collection configuration for an [EntityFacade].
///
/// # Natural key
/// Some collections are referenced interchangeably by either the primary key
/// or a business identifier (e.g. events by `event_id`). Declaring the
/// natural key here enables the facade's two-step lookup: filter by the
/// natural key first, and fall back to a point lookup treating the same
/// value as a primary key when nothing matched. The strategy is declared
/// explicitly, never inferred from the shape of a filter.
///
/// # Processors
/// The processor chain runs in order on every `create` and `update`,
/// injecting per-collection default fields (timestamps, default status)
/// without hardcoding those rules into the query adapter.
#[derive(Clone, Default)]
pub struct EntityConfig {
    natural_key: Option<String>,
    processors: Vec<Processor>,
}

impl EntityConfig {
    /// Creates a configuration with no natural key and no processors.
    pub fn new() -> Self {
        EntityConfig::default()
    }

    /// Declares the collection's natural key field.
    pub fn with_natural_key(mut self, field: &str) -> Self {
        self.natural_key = Some(field.to_string());
        self
    }

    /// Appends a processor to the chain.
    pub fn with_processor(mut self, processor: Processor) -> Self {
        self.processors.push(processor);
        self
    }

    /// Returns the declared natural key field, if any.
    pub fn natural_key(&self) -> Option<&str> {
        self.natural_key.as_deref()
    }

    /// Returns the processor chain.
    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }
}

/// Acknowledgement returned by [EntityFacade::remove].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoveResult {
    key: String,
}

impl RemoveResult {
    /// Returns the primary key the remove was issued for.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// A uniform CRUD surface over one named collection.
///
/// `EntityFacade` wraps the [QueryAdapter] with create/read/update/remove
/// verbs, a processor chain for per-collection default fields, and an
/// optional natural-key lookup. Every operation is a stateless round trip
/// (or a short sequence of round trips) to the backend; the facade holds no
/// cross-call session state, so it can be cloned and shared freely.
///
/// Concurrent `update` calls on the same key race with last-write-wins
/// semantics; the facade adds no coordination beyond the backend's
/// single-document atomicity.
///
/// # Examples
///
/// ```rust,ignore
/// use greenpass_data::entity::{EntityConfig, EntityFacade, Processor, TimestampProcessor};
/// use greenpass_data::store::{memory::InMemoryDatastore, DatastoreClient};
///
/// let client = DatastoreClient::new(InMemoryDatastore::new());
/// let events = EntityFacade::new("events", client)
///     .with_entity_config(
///         EntityConfig::new()
///             .with_natural_key("event_id")
///             .with_processor(Processor::new(TimestampProcessor::new())),
///     );
///
/// let created = events.create(doc! { event_id: "evt-1", title: "Open day" })?;
/// let found = events.get(&created.id().unwrap())?;
/// ```
#[derive(Clone)]
pub struct EntityFacade {
    collection: String,
    adapter: QueryAdapter,
    config: EntityConfig,
}

impl EntityFacade {
    /// Creates a facade over a collection with default configuration.
    pub fn new(collection: &str, client: DatastoreClient) -> Self {
        EntityFacade {
            collection: collection.to_string(),
            adapter: QueryAdapter::new(client, AdapterConfig::new()),
            config: EntityConfig::new(),
        }
    }

    /// Replaces the adapter configuration.
    pub fn with_adapter_config(mut self, config: AdapterConfig) -> Self {
        let client = self.adapter.client().clone();
        self.adapter = QueryAdapter::new(client, config);
        self
    }

    /// Replaces the entity configuration.
    pub fn with_entity_config(mut self, config: EntityConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the collection name this facade operates on.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Retrieves a document by its primary key.
    ///
    /// Absence is reported as `Ok(None)`, never as an error.
    pub fn get(&self, key: &str) -> DataResult<Option<Document>> {
        self.adapter.client().lookup(&self.collection, key)
    }

    /// Resolves a filter specification against the collection.
    ///
    /// Delegates to the [QueryAdapter], with one added rule: when a natural
    /// key is declared and the specification is solely an equality on that
    /// field, a miss falls back to a point lookup treating the value as a
    /// primary key. See [EntityConfig].
    pub fn filter(
        &self,
        spec: &FilterSpec,
        options: &QueryOptions,
    ) -> DataResult<Vec<Document>> {
        let results = self.adapter.resolve(&self.collection, spec, options)?;
        if !results.is_empty() {
            return Ok(results);
        }

        if let Some(natural_key) = self.config.natural_key() {
            if let Some((field, value)) = spec.as_single_equality() {
                if field == natural_key {
                    if let Some(key) = value.as_str() {
                        log::debug!(
                            "natural key {}={} missed on {}; falling back to point lookup",
                            natural_key,
                            key,
                            self.collection
                        );
                        return Ok(self
                            .get(key)?
                            .into_iter()
                            .collect());
                    }
                }
            }
        }
        Ok(results)
    }

    /// Returns the documents of the collection, subject to the options'
    /// limit. Equivalent to filtering with an empty specification. No
    /// ordering is guaranteed.
    pub fn list(&self, options: &QueryOptions) -> DataResult<Vec<Document>> {
        self.adapter
            .resolve(&self.collection, &FilterSpec::new(), options)
    }

    /// Inserts a new document.
    ///
    /// The payload first runs through the processor chain; the backend
    /// assigns a primary key unless the payload already carries one.
    ///
    /// # Returns
    ///
    /// The full stored document, including its `_id` and any fields the
    /// processors injected.
    pub fn create(&self, payload: Document) -> DataResult<Document> {
        let mut payload = payload;
        for processor in self.config.processors() {
            payload = processor.process_before_create(payload)?;
        }
        self.adapter.client().insert(&self.collection, payload)
    }

    /// Merges `patch` into the document with the given key.
    ///
    /// Fields absent from the patch are untouched. The patch runs through
    /// the processor chain first.
    ///
    /// # Errors
    ///
    /// `NotFound` when no document has the key; the collection is unchanged.
    pub fn update(&self, key: &str, patch: Document) -> DataResult<Document> {
        let mut patch = patch;
        for processor in self.config.processors() {
            patch = processor.process_before_update(patch)?;
        }
        self.adapter.client().merge(&self.collection, key, &patch)
    }

    /// Deletes the document with the given key.
    ///
    /// Idempotent: removing a nonexistent key is not an error.
    pub fn remove(&self, key: &str) -> DataResult<RemoveResult> {
        self.adapter.client().delete(&self.collection, key)?;
        Ok(RemoveResult {
            key: key.to_string(),
        })
    }

    /// Alias for [EntityFacade::remove]; callers use the two names
    /// interchangeably.
    pub fn delete(&self, key: &str) -> DataResult<RemoveResult> {
        self.remove(key)
    }
}

impl Debug for EntityFacade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityFacade")
            .field("collection", &self.collection)
            .field("natural_key", &self.config.natural_key())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Value, DOC_CREATED_AT, DOC_UPDATED_AT};
    use crate::doc;
    use crate::entity::{DefaultFieldProcessor, TimestampProcessor};
    use crate::filter::field;
    use crate::store::memory::InMemoryDatastore;

    fn facade(collection: &str) -> (EntityFacade, InMemoryDatastore) {
        let store = InMemoryDatastore::new();
        let facade = EntityFacade::new(collection, DatastoreClient::new(store.clone()));
        (facade, store)
    }

    #[test]
    fn create_then_get_round_trips() {
        let (items, _) = facade("items");
        let created = items.create(doc! { tag: "x" }).unwrap();
        let key = created.id().expect("key assigned");

        let found = items.get(&key).unwrap().expect("document present");
        assert_eq!(found, created);
        assert_eq!(found.get("tag"), Some(Value::from("x")));
    }

    #[test]
    fn get_missing_returns_none() {
        let (items, _) = facade("items");
        assert!(items.get("missing").unwrap().is_none());
    }

    #[test]
    fn create_honors_caller_assigned_key() {
        let (items, _) = facade("items");
        let created = items.create(doc! { "_id": "k1", tag: "x" }).unwrap();
        assert_eq!(created.id(), Some("k1".to_string()));
    }

    #[test]
    fn filter_delegates_to_adapter() {
        let (items, _) = facade("items");
        items.create(doc! { "_id": "a", tag: "x" }).unwrap();
        items.create(doc! { "_id": "b", tag: "y" }).unwrap();
        items.create(doc! { "_id": "c", tag: "x" }).unwrap();

        let spec = FilterSpec::new().with(field("tag").eq("x"));
        let results = items.filter(&spec, &QueryOptions::new()).unwrap();
        let mut keys: Vec<_> = results.iter().filter_map(|d| d.id()).collect();
        keys.sort();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn list_returns_everything() {
        let (items, _) = facade("items");
        items.create(doc! { a: 1 }).unwrap();
        items.create(doc! { a: 2 }).unwrap();
        assert_eq!(items.list(&QueryOptions::new()).unwrap().len(), 2);
        assert_eq!(items.list(&crate::query::limit_to(1)).unwrap().len(), 1);
    }

    #[test]
    fn update_merges_patch() {
        let (items, _) = facade("items");
        items.create(doc! { "_id": "a", tag: "x", n: 1 }).unwrap();

        let updated = items.update("a", doc! { n: 2 }).unwrap();
        assert_eq!(updated.get("tag"), Some(Value::from("x")));
        assert_eq!(updated.get("n"), Some(Value::I64(2)));
    }

    #[test]
    fn update_missing_key_fails_and_changes_nothing() {
        let (items, store) = facade("items");
        items.create(doc! { "_id": "a", n: 1 }).unwrap();

        let err = items.update("missing-key", doc! { x: 1 }).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.count("items"), 1);
        assert_eq!(
            items.get("a").unwrap().unwrap().get("n"),
            Some(Value::I64(1))
        );
    }

    #[test]
    fn remove_is_idempotent_and_acknowledges_key() {
        let (items, store) = facade("items");
        items.create(doc! { "_id": "a", n: 1 }).unwrap();

        let ack = items.remove("a").unwrap();
        assert_eq!(ack.key(), "a");
        assert_eq!(store.count("items"), 0);

        let ack = items.remove("a").unwrap();
        assert_eq!(ack.key(), "a");
        assert_eq!(store.count("items"), 0);

        // delete is the same operation under its other name
        assert_eq!(items.delete("a").unwrap().key(), "a");
    }

    #[test]
    fn natural_key_hit_returns_matches() {
        let (events, _) = facade("events");
        let events = events.with_entity_config(EntityConfig::new().with_natural_key("event_id"));
        events.create(doc! { "_id": "doc-1", event_id: "E1" }).unwrap();

        let spec = FilterSpec::new().with(field("event_id").eq("E1"));
        let results = events.filter(&spec, &QueryOptions::new()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id(), Some("doc-1".to_string()));
    }

    #[test]
    fn natural_key_miss_falls_back_to_primary_key() {
        let (events, _) = facade("events");
        let events = events.with_entity_config(EntityConfig::new().with_natural_key("event_id"));
        // no document has event_id == "E1", but one exists with that primary key
        events.create(doc! { "_id": "E1", title: "Open day" }).unwrap();

        let spec = FilterSpec::new().with(field("event_id").eq("E1"));
        let results = events.filter(&spec, &QueryOptions::new()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id(), Some("E1".to_string()));
    }

    #[test]
    fn natural_key_fallback_needs_exact_shape() {
        let (events, _) = facade("events");
        let events = events.with_entity_config(EntityConfig::new().with_natural_key("event_id"));
        events.create(doc! { "_id": "E1", status: "open" }).unwrap();

        // extra predicate disables the fallback
        let spec = FilterSpec::new()
            .with(field("event_id").eq("E1"))
            .with(field("status").eq("open"));
        assert!(events.filter(&spec, &QueryOptions::new()).unwrap().is_empty());

        // membership predicate on the natural key disables it too
        let spec = FilterSpec::new().with(field("event_id").is_in(["E1"]));
        assert!(events.filter(&spec, &QueryOptions::new()).unwrap().is_empty());
    }

    #[test]
    fn no_natural_key_means_no_fallback() {
        let (events, _) = facade("events");
        events.create(doc! { "_id": "E1", title: "Open day" }).unwrap();

        let spec = FilterSpec::new().with(field("event_id").eq("E1"));
        assert!(events.filter(&spec, &QueryOptions::new()).unwrap().is_empty());
    }

    #[test]
    fn processors_run_on_create() {
        let (items, _) = facade("registrations");
        let items = items.with_entity_config(
            EntityConfig::new()
                .with_processor(Processor::new(TimestampProcessor::new()))
                .with_processor(Processor::new(DefaultFieldProcessor::new(
                    "status", "pending",
                ))),
        );

        let created = items.create(doc! { user: "u1" }).unwrap();
        assert_eq!(created.get("status"), Some(Value::from("pending")));
        assert!(created.get(DOC_CREATED_AT).unwrap().as_timestamp().is_some());
        assert!(created.get(DOC_UPDATED_AT).unwrap().as_timestamp().is_some());

        // stored document matches the returned one
        let key = created.id().unwrap();
        assert_eq!(items.get(&key).unwrap().unwrap(), created);
    }

    #[test]
    fn processors_run_on_update() {
        let (items, _) = facade("registrations");
        let items = items.with_entity_config(
            EntityConfig::new().with_processor(Processor::new(TimestampProcessor::new())),
        );
        items.create(doc! { "_id": "r1", user: "u1" }).unwrap();

        let updated = items.update("r1", doc! { user: "u2" }).unwrap();
        assert!(updated.get(DOC_UPDATED_AT).unwrap().as_timestamp().is_some());
    }
}
