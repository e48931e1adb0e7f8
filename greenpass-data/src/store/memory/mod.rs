//! In-memory datastore backend.

mod store;

pub use store::InMemoryDatastore;
