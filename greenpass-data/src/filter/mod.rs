//! Filter specifications for selecting documents from collections.
//!
//! A filter specification is a conjunction (logical AND) of per-field
//! predicates. Two predicate shapes exist:
//!
//! - **Equality**: the field's value equals a given value
//! - **Membership**: the field's value is one of a sequence of candidates
//!
//! Membership predicates are subject to a backend cardinality limit; the
//! query adapter splits oversized candidate sequences into chunks and fans
//! them out as multiple backend queries (see [crate::query::QueryAdapter]).
//!
//! # Creating filter specifications
//!
//! Specifications are built with the fluent API:
//!
//! ```rust,ignore
//! use greenpass_data::filter::{field, FilterSpec};
//!
//! let spec = FilterSpec::new()
//!     .with(field("status").eq("active"))
//!     .with(field("school_id").is_in(["s1", "s2", "s3"]));
//! ```
//!
//! An empty specification matches every document in the collection.

mod fluent;
mod predicate;
mod spec;

pub use fluent::*;
pub use predicate::*;
pub use spec::*;
