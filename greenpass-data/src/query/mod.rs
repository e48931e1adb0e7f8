//! The query adapter: lowers filter specifications onto backend queries.

mod adapter;
mod options;

pub use adapter::*;
pub use options::*;
