// src/storage/local.rs

//! Local filesystem storage implementation.
//!
//! Persists the update archive as a single pretty-printed JSON array.
//! Writes go through a temp file and rename so a crashed run never
//! leaves a half-written archive behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::Update;
use crate::storage::UpdateStore;

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the containing directory exists.
    async fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> std::io::Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl UpdateStore for LocalStore {
    async fn load(&self) -> Result<Vec<Update>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::store_load(&self.path, e)),
        };

        // Present but unparsable is fatal, never treated as empty.
        serde_json::from_slice(&bytes).map_err(|e| AppError::store_load(&self.path, e))
    }

    async fn save(&self, updates: &[Update]) -> Result<()> {
        let bytes =
            serde_json::to_vec_pretty(updates).map_err(|e| AppError::persist(&self.path, e))?;
        self.write_bytes(&bytes)
            .await
            .map_err(|e| AppError::persist(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_update(id: &str) -> Update {
        Update {
            id: id.to_string(),
            timestamp: "2026-08-01".to_string(),
            link: format!("https://example.com/{id}"),
            entry: "Title\n\nBody".to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path().join("updates.json"));

        let updates = vec![make_update("a1"), make_update("b2")];
        store.save(&updates).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, updates);
    }

    #[tokio::test]
    async fn test_load_absent_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path().join("updates.json"));

        let loaded = store.load().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("updates.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let store = LocalStore::new(&path);
        match store.load().await {
            Err(AppError::StoreLoad { .. }) => {}
            other => panic!("expected store load error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_save_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path().join("data/nested/updates.json"));

        store.save(&[make_update("a1")]).await.unwrap();
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_file() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path().join("updates.json"));

        store
            .save(&[make_update("a1"), make_update("b2")])
            .await
            .unwrap();
        store.save(&[make_update("c3")]).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, vec![make_update("c3")]);
    }
}
