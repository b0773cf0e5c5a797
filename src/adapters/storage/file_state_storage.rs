//! File-based State Storage Adapter
//!
//! Stores the study state as a single YAML file on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::store::StudyState;
use crate::ports::{StateStorage, StateStorageError};

const STATE_FILE: &str = "study-state.yaml";

/// File-based storage for the study state
#[derive(Debug, Clone)]
pub struct FileStateStorage {
    base_path: PathBuf,
}

impl FileStateStorage {
    /// Create a new file storage with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let storage = FileStateStorage::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the state file
    pub fn state_file_path(&self) -> PathBuf {
        self.base_path.join(STATE_FILE)
    }

    async fn ensure_dir(&self) -> Result<(), StateStorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StateStorageError::IoError(e.to_string()))
    }
}

#[async_trait]
impl StateStorage for FileStateStorage {
    async fn save_state(&self, state: &StudyState) -> Result<(), StateStorageError> {
        self.ensure_dir().await?;

        let yaml = serde_yaml::to_string(state)
            .map_err(|e| StateStorageError::SerializationFailed(e.to_string()))?;

        fs::write(self.state_file_path(), yaml)
            .await
            .map_err(|e| StateStorageError::IoError(e.to_string()))?;

        Ok(())
    }

    async fn load_state(&self) -> Result<StudyState, StateStorageError> {
        let file_path = self.state_file_path();

        if !file_path.exists() {
            return Err(StateStorageError::NotFound);
        }

        let yaml = fs::read_to_string(&file_path)
            .await
            .map_err(|e| StateStorageError::IoError(e.to_string()))?;

        serde_yaml::from_str(&yaml)
            .map_err(|e| StateStorageError::DeserializationFailed(e.to_string()))
    }

    async fn exists(&self) -> Result<bool, StateStorageError> {
        Ok(self.state_file_path().exists())
    }

    async fn delete(&self) -> Result<(), StateStorageError> {
        let file_path = self.state_file_path();

        if file_path.exists() {
            fs::remove_file(&file_path)
                .await
                .map_err(|e| StateStorageError::IoError(e.to_string()))?;
        }

        Ok(())
    }
}
