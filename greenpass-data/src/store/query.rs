use crate::common::Value;
use crate::document::Document;

/// A query in the shape the backend natively supports.
///
/// A structured query ANDs together any number of equality predicates, at
/// most one membership predicate whose candidate list already fits the
/// backend's cardinality limit, and an optional result-count limit. The
/// query adapter lowers a full [FilterSpec](crate::filter::FilterSpec) into
/// one or more of these.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructuredQuery {
    equalities: Vec<(String, Value)>,
    membership: Option<(String, Vec<Value>)>,
    limit: Option<usize>,
}

impl StructuredQuery {
    /// Creates an empty query matching every document.
    pub fn new() -> Self {
        StructuredQuery::default()
    }

    /// Adds an equality predicate.
    pub fn with_equality(mut self, field: &str, value: Value) -> Self {
        self.equalities.push((field.to_string(), value));
        self
    }

    /// Adds all of the given equality predicates.
    pub fn with_equalities(mut self, equalities: &[(String, Value)]) -> Self {
        self.equalities.extend(equalities.iter().cloned());
        self
    }

    /// Sets the membership predicate.
    ///
    /// The candidate list must already be within the backend's cardinality
    /// limit; the caller is responsible for chunking.
    pub fn with_membership(mut self, field: &str, candidates: Vec<Value>) -> Self {
        self.membership = Some((field.to_string(), candidates));
        self
    }

    /// Caps the number of returned documents.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Returns the equality predicates.
    pub fn equalities(&self) -> &[(String, Value)] {
        &self.equalities
    }

    /// Returns the membership predicate, if any.
    pub fn membership(&self) -> Option<(&str, &[Value])> {
        self.membership
            .as_ref()
            .map(|(field, candidates)| (field.as_str(), candidates.as_slice()))
    }

    /// Returns the result-count limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Evaluates the query predicates (ignoring the limit) against a
    /// document. Backends that scan, like the in-memory store, use this;
    /// the limit is applied by the scanner.
    pub fn matches(&self, document: &Document) -> bool {
        for (field, expected) in &self.equalities {
            match document.get(field) {
                Some(actual) if &actual == expected => {}
                _ => return false,
            }
        }
        if let Some((field, candidates)) = &self.membership {
            match document.get(field) {
                Some(actual) if candidates.contains(&actual) => {}
                _ => return false,
            }
        }
        true
    }
}
