//! Response Cache Port - lookup of previously generated results.
//!
//! Consulted by the generation handler before the provider call. Only
//! results the model actually produced are stored; fallback placeholders
//! never are.

use async_trait::async_trait;

use crate::domain::study::{CacheKey, DomainObject};

/// Key-value store for generated domain objects
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Returns the cached object for `key`, if any
    async fn get(&self, key: &CacheKey) -> Option<DomainObject>;

    /// Stores `object` under `key`, replacing any previous entry
    async fn put(&self, key: CacheKey, object: DomainObject);

    /// Removes every entry
    async fn clear(&self);
}
