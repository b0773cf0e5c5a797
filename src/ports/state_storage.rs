//! State Storage Port - Interface for persisting the client study state.
//!
//! The state is a single snapshot per store; saving replaces whatever was
//! there before (last writer wins).

use async_trait::async_trait;

use crate::domain::store::StudyState;

/// Errors that can occur during state storage operations
#[derive(Debug, thiserror::Error)]
pub enum StateStorageError {
    #[error("No saved study state")]
    NotFound,

    #[error("Failed to serialize state: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize state: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting and loading the study state
#[async_trait]
pub trait StateStorage: Send + Sync {
    /// Save the study state, replacing any previous snapshot
    ///
    /// # Errors
    /// Returns `StateStorageError` if save fails
    async fn save_state(&self, state: &StudyState) -> Result<(), StateStorageError>;

    /// Load the last saved study state
    ///
    /// # Errors
    /// Returns `StateStorageError::NotFound` if nothing was saved yet
    async fn load_state(&self) -> Result<StudyState, StateStorageError>;

    /// Check if a snapshot has been saved
    async fn exists(&self) -> Result<bool, StateStorageError>;

    /// Delete the saved snapshot, if any
    async fn delete(&self) -> Result<(), StateStorageError>;

    /// Load the saved state, or an empty one when nothing was saved yet
    async fn load_or_default(&self) -> Result<StudyState, StateStorageError> {
        match self.load_state().await {
            Ok(state) => Ok(state),
            Err(StateStorageError::NotFound) => Ok(StudyState::default()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_storage_error_not_found() {
        let err = StateStorageError::NotFound;
        assert!(err.to_string().contains("No saved study state"));
    }

    #[test]
    fn test_state_storage_error_serialization() {
        let err = StateStorageError::SerializationFailed("Invalid YAML".to_string());
        assert!(err.to_string().contains("serialize"));
    }
}
