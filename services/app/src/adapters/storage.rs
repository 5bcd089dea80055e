//! services/app/src/adapters/storage.rs
//!
//! This module contains the file-backed storage adapter, the concrete
//! implementation of the `HistoryStorage` port from the `core` crate. The
//! entire history lives under a single durable key: one JSON file holding a
//! flat array of item records.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use summarizer_core::domain::SummaryItem;
use summarizer_core::ports::{HistoryStorage, PortError, PortResult};
use tracing::warn;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A storage adapter that implements the `HistoryStorage` port over one
/// local JSON file.
#[derive(Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Creates a new `JsonFileStorage` writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

//=========================================================================================
// `HistoryStorage` Trait Implementation
//=========================================================================================

#[async_trait]
impl HistoryStorage for JsonFileStorage {
    /// Reads the full history from the file.
    ///
    /// A missing file is a first run and yields an empty list. Contents that
    /// no longer parse (schema drift, partial write by an older build) fail
    /// soft: the problem is logged and an empty list is returned, so a bad
    /// durable record can never take the application down.
    async fn load(&self) -> PortResult<Vec<SummaryItem>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(PortError::Storage(err.to_string())),
        };

        match serde_json::from_slice::<Vec<SummaryItem>>(&raw) {
            Ok(items) => Ok(items),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "history file is malformed, starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Serializes and writes the full history, overwriting prior contents.
    ///
    /// The write goes through a temp file and a rename so a crash mid-write
    /// never leaves a truncated history behind.
    async fn save(&self, items: &[SummaryItem]) -> PortResult<()> {
        let raw = serde_json::to_vec_pretty(items)
            .map_err(|err| PortError::Storage(err.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|err| PortError::Storage(err.to_string()))?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &raw)
            .await
            .map_err(|err| PortError::Storage(err.to_string()))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|err| PortError::Storage(err.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn item(name: &str) -> SummaryItem {
        SummaryItem {
            id: Uuid::new_v4(),
            pdf_name: name.to_string(),
            pdf_size: 1234,
            summary: "## Summary\nsome text".to_string(),
            timestamp: Utc::now(),
            pdf_url: Some(format!("blob:{}", Uuid::new_v4())),
        }
    }

    #[tokio::test]
    async fn load_of_a_missing_file_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("history.json"));
        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("history.json"));

        let items = vec![item("b.pdf"), item("a.pdf")];
        storage.save(&items).await.unwrap();

        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded, items);
    }

    #[tokio::test]
    async fn save_of_loaded_state_is_byte_for_byte_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let storage = JsonFileStorage::new(&path);

        storage.save(&[item("a.pdf"), item("b.pdf")]).await.unwrap();
        let first = tokio::fs::read(&path).await.unwrap();

        let loaded = storage.load().await.unwrap();
        storage.save(&loaded).await.unwrap();
        let second = tokio::fs::read(&path).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn malformed_contents_fail_soft_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let storage = JsonFileStorage::new(&path);
        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn schema_drift_fails_soft_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        // A record written by some hypothetical future schema.
        tokio::fs::write(&path, br#"[{"identifier": 7, "title": "x"}]"#)
            .await
            .unwrap();

        let storage = JsonFileStorage::new(&path);
        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state/history.json");
        let storage = JsonFileStorage::new(&path);

        storage.save(&[item("a.pdf")]).await.unwrap();
        assert_eq!(storage.load().await.unwrap().len(), 1);
    }
}
