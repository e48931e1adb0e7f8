//! Documents: opaque field-to-value mappings identified by a primary key.

use im::OrdMap;
use std::fmt::{Debug, Display, Formatter};

use crate::common::{Value, DOC_ID};
use crate::errors::{DataResult, ErrorKind, DataError};

/// Represents a document in a collection using a lock-free persistent data
/// structure.
///
/// A document is composed of key-value pairs. The key is always a [String]
/// and the value is a [Value]. Collections enforce no schema; two documents
/// in the same collection may have entirely different fields.
///
/// The `_id` field is reserved: it holds the document's primary key. The key
/// is either assigned by the datastore during insertion or supplied by the
/// caller as a string, and is immutable once the document is stored.
///
/// ## Lock-Free Design
///
/// This struct uses `im::OrdMap` (a persistent ordered map):
/// - O(1) cloning via internal Arc sharing
/// - Mutations create new maps via structural sharing
/// - Each mutated document is completely independent
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    data: OrdMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: OrdMap::new(),
        }
    }

    /// Checks if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of fields in the document.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates the specified [Value] with the specified key in this
    /// document. If the key already exists, its value is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The key is empty
    /// * The key is the reserved `_id` field and the value is not a string
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice")?;
    /// doc.put("age", 30)?;
    /// assert_eq!(doc.size(), 2);
    /// ```
    pub fn put<T: Into<Value>>(&mut self, key: &str, value: T) -> DataResult<()> {
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(DataError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        let value = value.into();

        // the primary key is always a string
        if key == DOC_ID && !value.is_string() {
            log::error!("Document id must be a string value");
            return Err(DataError::new(
                "Document id must be a string value",
                ErrorKind::InvalidId,
            ));
        }

        self.data = self.data.update(key.to_string(), value);
        Ok(())
    }

    /// Returns the value associated with the key, or `None` if the field is
    /// absent.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.data.get(key).cloned()
    }

    /// Checks whether the document contains the specified field.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Removes a field from the document and returns its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let previous = self.data.get(key).cloned();
        self.data = self.data.without(key);
        previous
    }

    /// Returns the document's primary key, if one has been assigned.
    pub fn id(&self) -> Option<String> {
        self.data
            .get(DOC_ID)
            .and_then(|v| v.as_str().map(String::from))
    }

    /// Checks whether the document carries a primary key.
    pub fn has_id(&self) -> bool {
        self.data.contains_key(DOC_ID)
    }

    /// Merges the fields of `patch` into this document.
    ///
    /// Fields present in `patch` replace the corresponding fields here;
    /// fields absent from `patch` are untouched. The `_id` field of `patch`
    /// is ignored since a primary key is immutable once assigned.
    pub fn merge(&mut self, patch: &Document) {
        for (key, value) in patch.iter() {
            if key == DOC_ID {
                continue;
            }
            self.data = self.data.update(key.clone(), value.clone());
        }
    }

    /// Returns the field names of this document in sorted order.
    pub fn fields(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    /// Returns an iterator over the document's field/value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Normalizes a `doc!` macro key token into a field name.
///
/// Keys may be written as bare identifiers or string literals; stringified
/// literals keep their surrounding quotes, which are stripped here.
pub fn normalize(key: &str) -> String {
    key.trim_matches('"').to_string()
}

/// Creates a [Document] from key-value pairs.
///
/// Keys may be bare identifiers or string literals. Values may be literals,
/// expressions in parentheses, arrays, or nested documents in braces.
///
/// # Examples
///
/// ```ignore
/// let doc = doc! {
///     name: "Alice",
///     age: 30,
///     tags: ["student", "agent"],
///     profile: {
///         country: "CA"
///     }
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document
    () => {
        $crate::document::Document::new()
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::document::Document::new();
            $(
                doc.put(&$crate::document::normalize(stringify!($key)), $crate::doc_value!($value))
                    .expect(&format!("doc! rejected field {}", stringify!($key)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the `doc!` macro.
/// Handles nested documents, arrays, and expressions.
#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, literal, parenthesized arithmetic, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn put_and_get_round_trip() {
        let mut doc = Document::new();
        doc.put("name", "Alice").unwrap();
        doc.put("age", 30).unwrap();

        assert_eq!(doc.get("name"), Some(Value::from("Alice")));
        assert_eq!(doc.get("age"), Some(Value::I64(30)));
        assert_eq!(doc.get("missing"), None);
        assert_eq!(doc.size(), 2);
    }

    #[test]
    fn put_rejects_empty_key() {
        let mut doc = Document::new();
        let err = doc.put("", "x").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidOperation);
    }

    #[test]
    fn put_rejects_non_string_id() {
        let mut doc = Document::new();
        let err = doc.put(DOC_ID, 42).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidId);
    }

    #[test]
    fn put_accepts_string_id() {
        let mut doc = Document::new();
        doc.put(DOC_ID, "user-1").unwrap();
        assert_eq!(doc.id(), Some("user-1".to_string()));
        assert!(doc.has_id());
    }

    #[test]
    fn put_replaces_existing_value() {
        let mut doc = doc! { status: "inactive" };
        doc.put("status", "active").unwrap();
        assert_eq!(doc.get("status"), Some(Value::from("active")));
        assert_eq!(doc.size(), 1);
    }

    #[test]
    fn remove_returns_previous_value() {
        let mut doc = doc! { tag: "x" };
        assert_eq!(doc.remove("tag"), Some(Value::from("x")));
        assert_eq!(doc.remove("tag"), None);
        assert!(doc.is_empty());
    }

    #[test]
    fn merge_overwrites_and_preserves() {
        let mut doc = doc! { "_id": "k1", a: 1, b: 2 };
        let patch = doc! { "_id": "k2", b: 20, c: 30 };
        doc.merge(&patch);

        assert_eq!(doc.id(), Some("k1".to_string()));
        assert_eq!(doc.get("a"), Some(Value::I64(1)));
        assert_eq!(doc.get("b"), Some(Value::I64(20)));
        assert_eq!(doc.get("c"), Some(Value::I64(30)));
    }

    #[test]
    fn clone_is_independent() {
        let mut original = doc! { a: 1 };
        let snapshot = original.clone();
        original.put("a", 2).unwrap();

        assert_eq!(snapshot.get("a"), Some(Value::I64(1)));
        assert_eq!(original.get("a"), Some(Value::I64(2)));
    }

    #[test]
    fn doc_macro_builds_nested_structures() {
        let doc = doc! {
            name: "Alice",
            scores: [1, 2, 3],
            profile: {
                country: "CA"
            }
        };

        assert_eq!(doc.get("name"), Some(Value::from("Alice")));
        assert_eq!(
            doc.get("scores"),
            Some(Value::Array(vec![
                Value::I64(1),
                Value::I64(2),
                Value::I64(3)
            ]))
        );
        let profile = doc.get("profile").unwrap();
        let profile = profile.as_document().unwrap();
        assert_eq!(profile.get("country"), Some(Value::from("CA")));
    }

    #[test]
    fn doc_macro_accepts_string_literal_keys() {
        let doc = doc! { "_id": "e1", "event_id": "evt-9" };
        assert_eq!(doc.id(), Some("e1".to_string()));
        assert_eq!(doc.get("event_id"), Some(Value::from("evt-9")));
    }

    #[test]
    #[should_panic(expected = "doc! rejected field")]
    fn doc_macro_panics_on_non_string_id() {
        let _ = doc! { "_id": 42 };
    }

    #[test]
    fn fields_are_sorted() {
        let doc = doc! { b: 1, a: 2, c: 3 };
        assert_eq!(doc.fields(), vec!["a", "b", "c"]);
    }
}
