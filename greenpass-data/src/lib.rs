//! # GreenPass Data Layer
//!
//! Document data layer for the GreenPass platform. It provides a schema-less
//! document model, a datastore client abstraction with a bundled in-memory
//! backend, a query adapter that transparently works around the backend's
//! membership-predicate cardinality limit, and per-collection entity facades
//! with a processor hook point for default fields.
//!
//! ## Key Features
//!
//! - **Documents**: opaque field-to-value mappings with string primary keys
//! - **Filters**: tagged equality and membership predicates with a fluent API
//! - **Membership fan-out**: `in` predicates of any size are chunked into
//!   multiple backend queries and merged transparently
//! - **Entity facades**: `get`/`filter`/`list`/`create`/`update`/`remove`
//!   per collection, with natural-key fallback and default-field processors
//! - **Injected backend**: the datastore client is an explicit dependency,
//!   so tests substitute the in-memory store
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use greenpass_data::doc;
//! use greenpass_data::entity::EntityFacade;
//! use greenpass_data::filter::{field, FilterSpec};
//! use greenpass_data::query::QueryOptions;
//! use greenpass_data::store::{memory::InMemoryDatastore, DatastoreClient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DatastoreClient::new(InMemoryDatastore::new());
//! let orders = EntityFacade::new("orders", client);
//!
//! let created = orders.create(doc! { user_id: "u1", total: 120 })?;
//! let key = created.id().unwrap();
//!
//! let spec = FilterSpec::new().with(field("user_id").eq("u1"));
//! let results = orders.filter(&spec, &QueryOptions::new())?;
//! assert_eq!(results.len(), 1);
//!
//! orders.remove(&key)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`common`] - Values, reserved field names, and shared constants
//! - [`config`] - Query adapter configuration
//! - [`document`] - The document type and the `doc!` macro
//! - [`entity`] - Entity facades and processors
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Filter specifications and the fluent predicate API
//! - [`query`] - The query adapter and query options
//! - [`store`] - The datastore client abstraction and in-memory backend

pub mod common;
pub mod config;
pub mod document;
pub mod entity;
pub mod errors;
pub mod filter;
pub mod query;
pub mod store;

pub use common::Value;
pub use document::Document;
pub use errors::{DataError, DataResult, ErrorKind};

#[cfg(test)]
mod tests {
    // Setup only one time throughout the project.
    // It will take effect during test, project wide
    #[ctor::ctor]
    fn init() {
        colog::init();
    }

    #[test]
    fn log_facade_is_initialized() {
        // colog installs a logger for the whole test binary; emitting a
        // record through the facade must not panic
        log::debug!("log facade initialized for tests");
    }
}
