//! Common types and constants shared across the data layer.

mod constants;
mod value;

pub use constants::*;
pub use value::*;
