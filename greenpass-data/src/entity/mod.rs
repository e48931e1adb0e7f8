//! Entity facades: a uniform CRUD surface per named collection.

mod facade;
mod processor;

pub use facade::*;
pub use processor::*;
