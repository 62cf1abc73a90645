// ==================== PERSISTENCE MEDIUM ====================
// Key-value storage behind the record store. The whole user collection is
// serialized under one fixed key; implementations only need get/set/remove.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::utils::error::AppError;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// File-backed store: one JSON document per key under the storage directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<FileStore, AppError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .map_err(|e| AppError::PersistenceFailure(format!("cannot create {:?}: {}", dir, e)))?;
        Ok(FileStore { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::PersistenceFailure(format!(
                "failed to read key '{}': {}",
                key, e
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        // Write to a sidecar file first, then rename over the target, so a
        // reader never observes a partially written document
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));

        tokio::fs::write(&tmp, value).await.map_err(|e| {
            AppError::PersistenceFailure(format!("failed to write key '{}': {}", key, e))
        })?;
        tokio::fs::rename(&tmp, &path).await.map_err(|e| {
            AppError::PersistenceFailure(format!("failed to commit key '{}': {}", key, e))
        })
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::PersistenceFailure(format!(
                "failed to remove key '{}': {}",
                key, e
            ))),
        }
    }
}

/// In-memory store, used by tests in place of the file-backed one
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| AppError::PersistenceFailure(format!("store lock poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| AppError::PersistenceFailure(format!("store lock poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| AppError::PersistenceFailure(format!("store lock poisoned: {}", e)))?;
        entries.remove(key);
        Ok(())
    }
}
