//! Generation handlers - provider call plus response recovery.

mod generate;

pub use generate::{
    GenerateCommand, GenerateHandler, GenerateResult, GenerationError, GenerationSettings,
    GenerationSource,
};
