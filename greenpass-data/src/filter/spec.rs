use indexmap::IndexMap;
use std::fmt::{Display, Formatter};

use crate::common::{Value, DOC_ID};
use crate::document::Document;
use crate::filter::{FieldCondition, Predicate};

/// An ordered conjunction of per-field predicates.
///
/// A `FilterSpec` maps field names to [Predicate]s; a document matches when
/// every predicate matches. The mapping preserves insertion order, which
/// matters for membership predicates: when more than one is present, the
/// first drives the chunked backend fan-out and the rest are applied as an
/// in-memory intersection (see [crate::query::QueryAdapter]).
///
/// Adding a second condition on the same field replaces the first.
///
/// # Examples
///
/// ```rust,ignore
/// use greenpass_data::filter::{field, FilterSpec};
///
/// // all active registrations for one of three events
/// let spec = FilterSpec::new()
///     .with(field("status").eq("active"))
///     .with(field("event_id").is_in(["e1", "e2", "e3"]));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSpec {
    predicates: IndexMap<String, Predicate>,
}

impl FilterSpec {
    /// Creates an empty specification, which matches every document.
    pub fn new() -> Self {
        FilterSpec {
            predicates: IndexMap::new(),
        }
    }

    /// Adds a condition, consuming and returning the specification for
    /// chaining.
    pub fn with(mut self, condition: FieldCondition) -> Self {
        self.add(condition);
        self
    }

    /// Adds a condition in place.
    pub fn add(&mut self, condition: FieldCondition) {
        self.predicates
            .insert(condition.field, condition.predicate);
    }

    /// Checks whether this specification carries no predicates.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns the number of predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Returns the predicate on the given field, if any.
    pub fn get(&self, field: &str) -> Option<&Predicate> {
        self.predicates.get(field)
    }

    /// Returns an iterator over the predicates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Predicate)> {
        self.predicates.iter()
    }

    /// Splits the predicates into equality and membership groups, both in
    /// insertion order.
    pub fn partition(&self) -> (Vec<(String, Value)>, Vec<(String, Vec<Value>)>) {
        let mut equalities = Vec::new();
        let mut memberships = Vec::new();
        for (field, predicate) in &self.predicates {
            match predicate {
                Predicate::Equals(value) => equalities.push((field.clone(), value.clone())),
                Predicate::In(candidates) => {
                    memberships.push((field.clone(), candidates.clone()))
                }
            }
        }
        (equalities, memberships)
    }

    /// Recognizes the primary-key shorthand: a specification consisting of
    /// exactly one equality on `_id` with a string value.
    ///
    /// The adapter resolves this shape with a direct point lookup instead of
    /// a query. The two paths are semantically equivalent; the shorthand is
    /// an optimization.
    pub fn as_id_lookup(&self) -> Option<&str> {
        if self.predicates.len() != 1 {
            return None;
        }
        match self.predicates.get(DOC_ID) {
            Some(Predicate::Equals(value)) => value.as_str(),
            _ => None,
        }
    }

    /// Recognizes a specification consisting of exactly one equality
    /// predicate, returning the field and value.
    ///
    /// Used by the entity facade's natural-key fallback.
    pub fn as_single_equality(&self) -> Option<(&str, &Value)> {
        if self.predicates.len() != 1 {
            return None;
        }
        let (field, predicate) = self.predicates.iter().next()?;
        match predicate {
            Predicate::Equals(value) => Some((field.as_str(), value)),
            Predicate::In(_) => None,
        }
    }

    /// Evaluates the full conjunction against a document.
    pub fn matches(&self, document: &Document) -> bool {
        self.predicates
            .iter()
            .all(|(field, predicate)| predicate.matches(document.get(field).as_ref()))
    }
}

impl FromIterator<FieldCondition> for FilterSpec {
    fn from_iter<I: IntoIterator<Item = FieldCondition>>(iter: I) -> Self {
        let mut spec = FilterSpec::new();
        for condition in iter {
            spec.add(condition);
        }
        spec
    }
}

impl Display for FilterSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (field, predicate)) in self.predicates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", field, predicate)?;
        }
        write!(f, "}}")
    }
}
