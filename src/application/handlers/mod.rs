//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod generation;

pub use generation::{
    GenerateCommand, GenerateHandler, GenerateResult, GenerationError, GenerationSettings,
    GenerationSource,
};
