/// Options for controlling query resolution.
///
/// The only supported option is a result-count limit. There is deliberately
/// no sort option: ordering, if any, is the caller's responsibility or the
/// backend default.
///
/// # Examples
///
/// ```rust,ignore
/// use greenpass_data::query::{limit_to, QueryOptions};
///
/// let options = QueryOptions::new().limit(20);
/// let options = limit_to(20);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub(crate) limit: Option<usize>,
}

/// Creates `QueryOptions` that limits the number of results.
pub fn limit_to(limit: usize) -> QueryOptions {
    QueryOptions { limit: Some(limit) }
}

impl QueryOptions {
    /// Creates options with no limit.
    pub fn new() -> QueryOptions {
        QueryOptions { limit: None }
    }

    /// Sets the maximum number of documents to return.
    pub fn limit(mut self, limit: usize) -> QueryOptions {
        self.limit = Some(limit);
        self
    }

    /// Returns the configured limit, if any.
    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }
}
