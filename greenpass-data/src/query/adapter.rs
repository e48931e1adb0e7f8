use crate::config::AdapterConfig;
use crate::document::Document;
use crate::errors::DataResult;
use crate::filter::FilterSpec;
use crate::query::QueryOptions;
use crate::store::{DatastoreClient, StructuredQuery};

/// Executes filter specifications against a collection, working around the
/// backend's membership-predicate cardinality limit.
///
/// # Responsibility
/// `QueryAdapter` lowers a [FilterSpec] onto one or more [StructuredQuery]
/// round trips and merges the results, so callers can use membership
/// predicates of any size as if the backend supported them natively.
///
/// # Resolution strategy
/// - A spec of exactly `_id == value` becomes a direct point lookup.
/// - A spec without membership predicates becomes a single query ANDing all
///   equality predicates.
/// - Otherwise the first membership predicate drives a chunked fan-out:
///   its candidates are split into consecutive chunks no larger than the
///   configured cardinality limit, and one query per chunk is issued with
///   all equality predicates attached. Any further membership predicates are
///   applied as an in-memory intersection over the accumulated results.
///
/// The caller's limit is applied to the merged result set, and the fan-out
/// short-circuits once enough documents have accumulated. Chunk queries run
/// sequentially; no ordering is guaranteed across chunks.
///
/// # Failure modes
/// Backend errors propagate unchanged: no retry, no translation. Filter
/// values of a type different from the stored field's never match; the only
/// symptom of a type mismatch is an empty result.
#[derive(Clone)]
pub struct QueryAdapter {
    client: DatastoreClient,
    config: AdapterConfig,
}

impl QueryAdapter {
    /// Creates an adapter over the given datastore client.
    pub fn new(client: DatastoreClient, config: AdapterConfig) -> Self {
        QueryAdapter { client, config }
    }

    /// Returns the underlying datastore client.
    pub fn client(&self) -> &DatastoreClient {
        &self.client
    }

    /// Returns the adapter configuration.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Resolves a filter specification against a collection.
    ///
    /// The result is equivalent to evaluating the specification as a logical
    /// AND of all its predicates over the entire collection, truncated to
    /// `options.limit` when set. An empty specification matches every
    /// document.
    ///
    /// # Arguments
    ///
    /// * `collection` - The collection to query
    /// * `spec` - The filter specification; may be empty
    /// * `options` - Result-count limit
    ///
    /// # Errors
    ///
    /// Propagates backend connectivity and permission errors unchanged.
    pub fn resolve(
        &self,
        collection: &str,
        spec: &FilterSpec,
        options: &QueryOptions,
    ) -> DataResult<Vec<Document>> {
        // primary-key shorthand: skip querying entirely
        if let Some(key) = spec.as_id_lookup() {
            log::debug!(
                "resolving filter on {} as point lookup of {}",
                collection,
                key
            );
            return Ok(self.client.lookup(collection, key)?.into_iter().collect());
        }

        let (equalities, memberships) = spec.partition();

        // a membership predicate with no candidates matches nothing
        if memberships.iter().any(|(_, candidates)| candidates.is_empty()) {
            return Ok(Vec::new());
        }

        let limit = options.get_limit();

        if memberships.is_empty() {
            let query = StructuredQuery::new()
                .with_equalities(&equalities)
                .with_limit(limit);
            return self.client.query(collection, &query);
        }

        let (driving_field, candidates) = &memberships[0];
        let extra = &memberships[1..];
        let chunk_limit = self.config.membership_chunk_limit();
        log::debug!(
            "fanning out membership predicate on {}.{} across {} candidates (chunk limit {})",
            collection,
            driving_field,
            candidates.len(),
            chunk_limit
        );

        let mut accumulator: Vec<Document> = Vec::new();
        for chunk in candidates.chunks(chunk_limit) {
            // extra membership predicates filter in memory after retrieval;
            // a limit pushed down to the backend would starve that filter
            let chunk_query_limit = if extra.is_empty() {
                limit.map(|l| l.saturating_sub(accumulator.len()))
            } else {
                None
            };
            let query = StructuredQuery::new()
                .with_equalities(&equalities)
                .with_membership(driving_field, chunk.to_vec())
                .with_limit(chunk_query_limit);
            let mut results = self.client.query(collection, &query)?;

            if !extra.is_empty() {
                results.retain(|document| {
                    extra.iter().all(|(field, candidates)| {
                        document
                            .get(field)
                            .map(|value| candidates.contains(&value))
                            .unwrap_or(false)
                    })
                });
            }

            accumulator.append(&mut results);
            if let Some(limit) = limit {
                if accumulator.len() >= limit {
                    break;
                }
            }
        }

        if let Some(limit) = limit {
            accumulator.truncate(limit);
        }
        Ok(accumulator)
    }
}
