use crate::common::Value;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// A single filter condition on one document field.
///
/// The two variants make the adapter's branching exhaustive: every predicate
/// is either an equality match or a membership test, and there is no ad hoc
/// marker object to sniff at runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Matches documents where the field equals the value.
    Equals(Value),
    /// Matches documents where the field's value is one of the candidates.
    ///
    /// An empty candidate sequence matches nothing. It is not an error; a
    /// caller building candidate lists from other query results would
    /// otherwise have to special-case the empty list everywhere.
    In(Vec<Value>),
}

impl Predicate {
    /// Evaluates this predicate against a field value read from a document.
    ///
    /// `actual` is `None` when the document does not carry the field, which
    /// never matches.
    pub fn matches(&self, actual: Option<&Value>) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        match self {
            Predicate::Equals(expected) => actual == expected,
            Predicate::In(candidates) => candidates.contains(actual),
        }
    }

    /// Checks whether this is a membership predicate.
    pub fn is_membership(&self) -> bool {
        matches!(self, Predicate::In(_))
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Equals(value) => write!(f, "== {}", value),
            Predicate::In(candidates) => {
                write!(
                    f,
                    "in [{}]",
                    candidates.iter().map(|c| c.to_string()).join(", ")
                )
            }
        }
    }
}
