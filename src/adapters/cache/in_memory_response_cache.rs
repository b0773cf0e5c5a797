//! In-memory response cache.
//!
//! Process-local and unbounded; entries live until `clear` or restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::study::{CacheKey, DomainObject};
use crate::ports::ResponseCache;

/// HashMap-backed cache shared across clones.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResponseCache {
    entries: Arc<RwLock<HashMap<CacheKey, DomainObject>>>,
}

impl InMemoryResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ResponseCache for InMemoryResponseCache {
    async fn get(&self, key: &CacheKey) -> Option<DomainObject> {
        self.entries.read().await.get(key).cloned()
    }

    async fn put(&self, key: CacheKey, object: DomainObject) {
        self.entries.write().await.insert(key, object);
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
