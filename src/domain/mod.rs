//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, validation errors)
//! - `study` - Generation requests, study plans, flashcards, quizzes, prompts
//! - `recovery` - Model output to validated domain object, with repair and fallback
//! - `store` - Persisted client state with immutable snapshot actions

pub mod foundation;
pub mod recovery;
pub mod store;
pub mod study;
