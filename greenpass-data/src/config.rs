//! Configuration for the query adapter.

use crate::common::DEFAULT_MEMBERSHIP_CHUNK_LIMIT;
use crate::errors::{DataError, DataResult, ErrorKind};

/// Configuration for [QueryAdapter](crate::query::QueryAdapter).
///
/// The only tunable is the backend's membership-predicate cardinality limit.
/// The default matches Firestore's 10-item `in` clause limit; a backend with
/// a different limit configures its own value.
///
/// # Examples
///
/// ```rust,ignore
/// use greenpass_data::config::AdapterConfig;
///
/// let config = AdapterConfig::new().with_membership_chunk_limit(30)?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterConfig {
    membership_chunk_limit: usize,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        AdapterConfig {
            membership_chunk_limit: DEFAULT_MEMBERSHIP_CHUNK_LIMIT,
        }
    }

    /// Sets the maximum candidate count for a single backend membership
    /// predicate.
    ///
    /// # Errors
    ///
    /// Returns an error if the limit is zero.
    pub fn with_membership_chunk_limit(mut self, limit: usize) -> DataResult<Self> {
        if limit == 0 {
            log::error!("Membership chunk limit must be positive");
            return Err(DataError::new(
                "Membership chunk limit must be positive",
                ErrorKind::InvalidOperation,
            ));
        }
        self.membership_chunk_limit = limit;
        Ok(self)
    }

    /// Returns the configured membership chunk limit.
    pub fn membership_chunk_limit(&self) -> usize {
        self.membership_chunk_limit
    }
}
