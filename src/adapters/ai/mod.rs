//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port for various LLM providers.
//!
//! ## Available Adapters
//!
//! - `AnthropicProvider` - Anthropic Claude models (Haiku by default)
//! - `OpenAIProvider` - OpenAI chat completion models
//! - `MockAIProvider` - Configurable mock for testing

mod anthropic_provider;
mod http_status;
mod mock_provider;
mod openai_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider, DEFAULT_ANTHROPIC_MODEL};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider, DEFAULT_OPENAI_MODEL};
