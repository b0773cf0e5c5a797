//! HTTP adapters - REST API implementations.

pub mod generation;

pub use generation::{generation_routes, GenerationHandlers};
