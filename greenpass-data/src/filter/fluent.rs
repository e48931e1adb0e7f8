use crate::common::Value;
use crate::filter::Predicate;

/// Creates a fluent condition builder for the specified field name.
///
/// The returned builder provides methods for constructing equality and
/// membership conditions that can be added to a
/// [FilterSpec](crate::filter::FilterSpec).
///
/// # Arguments
///
/// * `field_name` - The name of the field to filter on
///
/// # Returns
///
/// A `FluentField` builder for constructing field-specific conditions
pub fn field(field_name: &str) -> FluentField {
    FluentField {
        field_name: field_name.to_string(),
    }
}

/// A fluent builder for constructing conditions on a specific field.
pub struct FluentField {
    field_name: String,
}

impl FluentField {
    /// Creates a condition matching documents where the field equals the
    /// specified value.
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> FieldCondition {
        FieldCondition {
            field: self.field_name,
            predicate: Predicate::Equals(value.into()),
        }
    }

    /// Creates a condition matching documents where the field's value is one
    /// of the specified candidates.
    ///
    /// An empty candidate sequence produces a condition that matches nothing.
    #[inline]
    pub fn is_in<I, T>(self, candidates: I) -> FieldCondition
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        FieldCondition {
            field: self.field_name,
            predicate: Predicate::In(candidates.into_iter().map(Into::into).collect()),
        }
    }
}

/// A named field paired with the predicate applied to it.
///
/// Produced by the fluent API and consumed by
/// [FilterSpec](crate::filter::FilterSpec).
#[derive(Clone, Debug, PartialEq)]
pub struct FieldCondition {
    pub(crate) field: String,
    pub(crate) predicate: Predicate,
}

impl FieldCondition {
    /// Returns the field name this condition applies to.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the predicate applied to the field.
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_builds_equality_condition() {
        let condition = field("status").eq("active");
        assert_eq!(condition.field(), "status");
        assert_eq!(
            condition.predicate(),
            &Predicate::Equals(Value::from("active"))
        );
    }

    #[test]
    fn is_in_builds_membership_condition() {
        let condition = field("id").is_in([1, 2, 3]);
        assert_eq!(condition.field(), "id");
        assert_eq!(
            condition.predicate(),
            &Predicate::In(vec![Value::I64(1), Value::I64(2), Value::I64(3)])
        );
    }

    #[test]
    fn is_in_accepts_empty_iterator() {
        let condition = field("id").is_in(Vec::<i64>::new());
        assert_eq!(condition.predicate(), &Predicate::In(vec![]));
    }
}
