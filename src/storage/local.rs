//! Local filesystem storage.
//!
//! Reads the static fallback document:
//!
//! ```text
//! {root}/
//! └── data/
//!     └── christian_news.json   # NewsDocument
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::NewsDocument;
use crate::storage::{NewsBatch, NewsSource};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    pub async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Load a news document, or `None` if it does not exist.
    pub async fn load_document(&self, key: &str) -> Result<Option<NewsDocument>> {
        self.read_json(key).await
    }
}

/// The static JSON document as a news source.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    storage: LocalStorage,
    key: String,
}

impl DocumentSource {
    pub fn new(storage: LocalStorage, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }
}

#[async_trait]
impl NewsSource for DocumentSource {
    fn name(&self) -> &str {
        "static document"
    }

    async fn fetch(&self) -> Result<NewsBatch> {
        let document = self.storage.load_document(&self.key).await?.ok_or_else(|| {
            AppError::unavailable(
                self.name(),
                format!("{} not found", self.storage.path(&self.key).display()),
            )
        })?;

        log::debug!(
            "Loaded {} article(s) from {} (last updated {:?})",
            document.articles.len(),
            self.key,
            document.last_updated
        );

        let last_updated = Some(document.last_updated).filter(|s| !s.trim().is_empty());
        Ok(NewsBatch {
            records: document.articles,
            last_updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOCUMENT: &str = r#"{
        "last_updated": "2025-03-10T08:00:00Z",
        "total_articles": 2,
        "sources": ["Guiame"],
        "articles": [
            {"title": "Congresso de missões", "summary": "Evento reúne igrejas",
             "url": "https://example.com/congresso", "source": "Guiame",
             "date": "2025-03-10T07:00:00Z", "category": "Missões"},
            {"title": "Sem data", "url": "https://example.com/sem-data", "source": "Guiame"}
        ]
    }"#;

    fn write(tmp: &TempDir, key: &str, content: &str) {
        let path = tmp.path().join(key);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_load_document() {
        let tmp = TempDir::new().unwrap();
        write(&tmp, "data/christian_news.json", DOCUMENT);
        let storage = LocalStorage::new(tmp.path());

        let document = storage
            .load_document("data/christian_news.json")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(document.total_articles, 2);
        assert_eq!(document.articles.len(), 2);
        assert_eq!(document.sources, vec!["Guiame"]);
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        assert!(storage.load_document("nope.json").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_source_reports_missing_document() {
        let tmp = TempDir::new().unwrap();
        let source = DocumentSource::new(LocalStorage::new(tmp.path()), "nope.json");

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, AppError::Source { .. }));
    }

    #[tokio::test]
    async fn test_source_rejects_malformed_document() {
        let tmp = TempDir::new().unwrap();
        write(&tmp, "news.json", "{ not json");
        let source = DocumentSource::new(LocalStorage::new(tmp.path()), "news.json");

        assert!(matches!(source.fetch().await, Err(AppError::Json(_))));
    }

    #[tokio::test]
    async fn test_source_keeps_valid_records_next_to_bad_ones() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp,
            "news.json",
            r#"{"last_updated": "2025-03-10T08:00:00Z", "articles": [
                {"title": "Congresso de missões", "url": "https://example.com/congresso",
                 "source": "Guiame", "image_url": 42},
                null
            ]}"#,
        );
        let source = DocumentSource::new(LocalStorage::new(tmp.path()), "news.json");

        let batch = source.fetch().await.unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].title.as_deref(), Some("Congresso de missões"));
        assert_eq!(batch.records[0].image_url, None);
    }

    #[tokio::test]
    async fn test_source_carries_last_updated() {
        let tmp = TempDir::new().unwrap();
        write(&tmp, "news.json", DOCUMENT);
        let source = DocumentSource::new(LocalStorage::new(tmp.path()), "news.json");

        let batch = source.fetch().await.unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.last_updated.as_deref(), Some("2025-03-10T08:00:00Z"));
    }
}
