//! Response cache adapters.

mod in_memory_response_cache;

pub use in_memory_response_cache::InMemoryResponseCache;
