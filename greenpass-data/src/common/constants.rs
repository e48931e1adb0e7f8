/// Reserved field holding a document's primary key.
///
/// The key is assigned at insertion time (by the backend, or by the caller
/// when the payload already carries one) and is immutable afterwards.
pub const DOC_ID: &str = "_id";

/// Field stamped by [crate::entity::TimestampProcessor] at creation time.
pub const DOC_CREATED_AT: &str = "created_at";

/// Field stamped by [crate::entity::TimestampProcessor] on every write.
pub const DOC_UPDATED_AT: &str = "updated_at";

/// Default cardinality limit for a single backend membership predicate.
///
/// Matches the Firestore `in` clause limit. Membership predicates larger than
/// the configured limit are split into consecutive chunks and fanned out as
/// multiple backend queries.
pub const DEFAULT_MEMBERSHIP_CHUNK_LIMIT: usize = 10;
