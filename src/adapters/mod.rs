//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - LLM providers (Anthropic, OpenAI, mock)
//! - `cache` - Response cache implementations
//! - `http` - axum routes for the generation endpoints
//! - `storage` - Study state persistence (file, in-memory)

pub mod ai;
pub mod cache;
pub mod http;
pub mod storage;
