//! In-memory bookmark store for tests and dry runs.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{BookmarkEntry, BookmarkStore, StoreError};

/// Store backed by a plain vector. Never touches a browser profile.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<BookmarkEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(entries: Vec<BookmarkEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Snapshot of the current entries, in insertion order.
    pub async fn entries(&self) -> Vec<BookmarkEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn search(&self, title: &str) -> Result<Vec<BookmarkEntry>, StoreError> {
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .filter(|e| e.title == title)
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, url: &str) -> Result<BookmarkEntry, StoreError> {
        let mut entries = self.entries.lock().await;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if entry.url.is_none() {
            return Err(StoreError::Folder(id.to_string()));
        }
        entry.url = Some(url.to_string());
        Ok(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, title: &str, url: Option<&str>) -> BookmarkEntry {
        BookmarkEntry {
            id: id.to_string(),
            title: title.to_string(),
            url: url.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn search_matches_exact_title_only() {
        let store = MemoryStore::seeded(vec![
            entry("1", "Telescope", Some("https://a.example")),
            entry("2", "Telescope", Some("https://b.example")),
            entry("3", "Telescope Logs", Some("https://c.example")),
        ]);
        let hits = store.search("Telescope").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|e| e.title == "Telescope"));
    }

    #[tokio::test]
    async fn search_returns_folders_too() {
        let store = MemoryStore::seeded(vec![entry("1", "SKA", None)]);
        let hits = store.search("SKA").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, None);
    }

    #[tokio::test]
    async fn update_replaces_url_and_returns_entry() {
        let store = MemoryStore::seeded(vec![entry("1", "T", Some("https://old.example"))]);
        let updated = store.update("1", "https://new.example").await.unwrap();
        assert_eq!(updated.url.as_deref(), Some("https://new.example"));
        let entries = store.entries().await;
        assert_eq!(entries[0].url.as_deref(), Some("https://new.example"));
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        match store.update("42", "https://x.example").await {
            Err(StoreError::NotFound(id)) => assert_eq!(id, "42"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn update_folder_is_rejected() {
        let store = MemoryStore::seeded(vec![entry("7", "Folder", None)]);
        match store.update("7", "https://x.example").await {
            Err(StoreError::Folder(id)) => assert_eq!(id, "7"),
            other => panic!("expected Folder, got {:?}", other),
        }
    }
}
