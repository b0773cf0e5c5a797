//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Outbound completion call to an LLM provider
//! - `ResponseCache` - Lookup of previously generated results
//! - `StateStorage` - Persistence of the client study state

mod ai_provider;
mod response_cache;
mod state_storage;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use response_cache::ResponseCache;
pub use state_storage::{StateStorage, StateStorageError};
