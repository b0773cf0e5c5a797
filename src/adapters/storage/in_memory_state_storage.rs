//! In-Memory State Storage Adapter
//!
//! Stores the study state in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::store::StudyState;
use crate::ports::{StateStorage, StateStorageError};

/// In-memory storage for the study state
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStorage {
    state: Arc<RwLock<Option<StudyState>>>,
}

impl InMemoryStateStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the stored state (useful for tests)
    pub async fn clear(&self) {
        *self.state.write().await = None;
    }
}

#[async_trait]
impl StateStorage for InMemoryStateStorage {
    async fn save_state(&self, state: &StudyState) -> Result<(), StateStorageError> {
        *self.state.write().await = Some(state.clone());
        Ok(())
    }

    async fn load_state(&self) -> Result<StudyState, StateStorageError> {
        self.state
            .read()
            .await
            .clone()
            .ok_or(StateStorageError::NotFound)
    }

    async fn exists(&self) -> Result<bool, StateStorageError> {
        Ok(self.state.read().await.is_some())
    }

    async fn delete(&self) -> Result<(), StateStorageError> {
        self.clear().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::ActivityKind;

    #[tokio::test]
    async fn test_in_memory_save_and_load() {
        let storage = InMemoryStateStorage::new();
        let state = StudyState::new().record_activity(ActivityKind::QuizStarted, "Rome");

        storage.save_state(&state).await.unwrap();

        assert_eq!(storage.load_state().await.unwrap(), state);
        assert!(storage.exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_in_memory_load_missing() {
        let storage = InMemoryStateStorage::new();
        assert!(matches!(
            storage.load_state().await,
            Err(StateStorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_in_memory_delete() {
        let storage = InMemoryStateStorage::new();
        storage.save_state(&StudyState::new()).await.unwrap();

        storage.delete().await.unwrap();

        assert!(!storage.exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_in_memory_clones_share_state() {
        let storage = InMemoryStateStorage::new();
        let other = storage.clone();

        storage.save_state(&StudyState::new()).await.unwrap();

        assert!(other.exists().await.unwrap());
    }
}
