//! Chromium `Bookmarks` profile file backend.
//!
//! Chromium keeps all bookmarks in one JSON document under the profile
//! directory. The adapter parses the tree once at load, serves searches from
//! memory, and writes the whole document back atomically (staging file plus
//! rename) on every update. Unknown fields such as `guid` and `date_added`
//! are carried through untouched; the `checksum` field is dropped on save so
//! the browser recomputes it instead of rejecting the edit.
//!
//! The browser must be closed while the file is rewritten, or it will
//! overwrite the result on exit.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{BookmarkEntry, BookmarkStore, StoreError};

/// Node type tag for URL bookmarks (`folder` being the other one).
const KIND_URL: &str = "url";

/// Staging file suffix used before atomic rename.
const TEMP_SUFFIX: &str = ".nbu-tmp";

/// Top-level shape of the Bookmarks document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookmarkFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    checksum: Option<String>,
    roots: BTreeMap<String, Node>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// One node of the bookmark tree. Extra fields round-trip via `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Node {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Vec<Node>>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// Bookmark store backed by a Chromium profile file.
#[derive(Debug)]
pub struct ChromeStore {
    path: PathBuf,
    doc: Mutex<BookmarkFile>,
}

impl ChromeStore {
    /// Parses the document at `path`.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::Unavailable(format!("read {}: {}", path.display(), e)))?;
        let doc: BookmarkFile = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Unavailable(format!("parse {}: {}", path.display(), e)))?;
        Ok(Self {
            path,
            doc: Mutex::new(doc),
        })
    }

    /// Default profile location: `~/.config/google-chrome/Default/Bookmarks`.
    pub fn default_path() -> Result<PathBuf, StoreError> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("google-chrome")
            .map_err(|e| StoreError::Unavailable(format!("locate Chrome profile: {}", e)))?;
        Ok(xdg_dirs.get_config_home().join("Default").join("Bookmarks"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn save(&self, doc: &BookmarkFile) -> Result<(), StoreError> {
        let mut out = doc.clone();
        // A stale checksum makes the browser discard the whole file.
        out.checksum = None;
        let body = serde_json::to_string_pretty(&out)
            .map_err(|e| StoreError::Unavailable(format!("encode bookmarks: {}", e)))?;
        let staging = temp_path(&self.path);
        tokio::fs::write(&staging, body)
            .await
            .map_err(|e| StoreError::Unavailable(format!("write {}: {}", staging.display(), e)))?;
        tokio::fs::rename(&staging, &self.path).await.map_err(|e| {
            StoreError::Unavailable(format!("replace {}: {}", self.path.display(), e))
        })?;
        Ok(())
    }
}

#[async_trait]
impl BookmarkStore for ChromeStore {
    async fn search(&self, title: &str) -> Result<Vec<BookmarkEntry>, StoreError> {
        let doc = self.doc.lock().await;
        let mut hits = Vec::new();
        for root in doc.roots.values() {
            collect_titled(root, title, &mut hits);
        }
        Ok(hits)
    }

    async fn update(&self, id: &str, url: &str) -> Result<BookmarkEntry, StoreError> {
        let mut doc = self.doc.lock().await;
        let node = find_node_mut(&mut doc.roots, id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if node.kind != KIND_URL {
            return Err(StoreError::Folder(id.to_string()));
        }
        node.url = Some(url.to_string());
        let updated = BookmarkEntry {
            id: node.id.clone(),
            title: node.name.clone(),
            url: node.url.clone(),
        };
        self.save(&doc).await?;
        Ok(updated)
    }
}

/// Path for the staging file: appends the suffix to the final path.
fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

fn collect_titled(node: &Node, title: &str, hits: &mut Vec<BookmarkEntry>) {
    if node.name == title {
        hits.push(BookmarkEntry {
            id: node.id.clone(),
            title: node.name.clone(),
            url: node.url.clone(),
        });
    }
    if let Some(children) = &node.children {
        for child in children {
            collect_titled(child, title, hits);
        }
    }
}

fn find_node_mut<'a>(roots: &'a mut BTreeMap<String, Node>, id: &str) -> Option<&'a mut Node> {
    for root in roots.values_mut() {
        if let Some(node) = find_in_subtree_mut(root, id) {
            return Some(node);
        }
    }
    None
}

fn find_in_subtree_mut<'a>(node: &'a mut Node, id: &str) -> Option<&'a mut Node> {
    if node.id == id {
        return Some(node);
    }
    if let Some(children) = node.children.as_mut() {
        for child in children {
            if let Some(found) = find_in_subtree_mut(child, id) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_doc() -> serde_json::Value {
        json!({
            "checksum": "d41d8cd98f00b204e9800998ecf8427e",
            "roots": {
                "bookmark_bar": {
                    "children": [
                        {
                            "date_added": "13350000000000000",
                            "guid": "c9e85d3e-89a4-4e2e-8000-000000000001",
                            "id": "5",
                            "name": "SKA001",
                            "type": "url",
                            "url": "https://k8s.example/ns/staging-dish-lmc-ska001/device"
                        },
                        {
                            "children": [
                                {
                                    "id": "8",
                                    "name": "SKA001",
                                    "type": "url",
                                    "url": "https://grafana.example/d/abc?ns=staging-dish-lmc-ska001"
                                }
                            ],
                            "id": "6",
                            "name": "Dashboards",
                            "type": "folder"
                        }
                    ],
                    "id": "1",
                    "name": "Bookmarks bar",
                    "type": "folder"
                },
                "other": { "children": [], "id": "2", "name": "Other bookmarks", "type": "folder" },
                "synced": { "children": [], "id": "3", "name": "Mobile bookmarks", "type": "folder" }
            },
            "version": 1
        })
    }

    async fn store_in(dir: &tempfile::TempDir) -> ChromeStore {
        let path = dir.path().join("Bookmarks");
        std::fs::write(&path, serde_json::to_string_pretty(&sample_doc()).unwrap()).unwrap();
        ChromeStore::load(&path).await.unwrap()
    }

    #[test]
    fn temp_path_appends_suffix() {
        let p = temp_path(Path::new("/tmp/Bookmarks"));
        assert_eq!(p.to_string_lossy(), "/tmp/Bookmarks.nbu-tmp");
    }

    #[tokio::test]
    async fn search_walks_all_roots_and_nesting() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;
        let hits = store.search("SKA001").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "5");
        assert_eq!(hits[1].id, "8");
    }

    #[tokio::test]
    async fn search_includes_folders_without_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;
        let hits = store.search("Dashboards").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, None);
    }

    #[tokio::test]
    async fn update_rewrites_url_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;
        let updated = store
            .update("8", "https://grafana.example/d/abc?ns=integration-dish-lmc-ska001")
            .await
            .unwrap();
        assert_eq!(updated.id, "8");
        assert_eq!(
            updated.url.as_deref(),
            Some("https://grafana.example/d/abc?ns=integration-dish-lmc-ska001")
        );

        let raw = std::fs::read_to_string(dir.path().join("Bookmarks")).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            doc["roots"]["bookmark_bar"]["children"][1]["children"][0]["url"],
            "https://grafana.example/d/abc?ns=integration-dish-lmc-ska001"
        );
        // Untouched siblings keep their metadata.
        assert_eq!(
            doc["roots"]["bookmark_bar"]["children"][0]["guid"],
            "c9e85d3e-89a4-4e2e-8000-000000000001"
        );
    }

    #[tokio::test]
    async fn save_drops_checksum_and_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;
        store.update("5", "https://k8s.example/new").await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("Bookmarks")).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(doc.get("checksum").is_none());
        assert_eq!(doc["version"], 1);
        assert!(!dir.path().join("Bookmarks.nbu-tmp").exists());
    }

    #[tokio::test]
    async fn update_folder_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;
        match store.update("6", "https://x.example").await {
            Err(StoreError::Folder(id)) => assert_eq!(id, "6"),
            other => panic!("expected Folder, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;
        match store.update("999", "https://x.example").await {
            Err(StoreError::NotFound(id)) => assert_eq!(id, "999"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn load_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        match ChromeStore::load(dir.path().join("Bookmarks")).await {
            Err(StoreError::Unavailable(msg)) => assert!(msg.contains("read"), "msg: {}", msg),
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn load_malformed_json_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bookmarks");
        std::fs::write(&path, "{not json").unwrap();
        match ChromeStore::load(&path).await {
            Err(StoreError::Unavailable(msg)) => assert!(msg.contains("parse"), "msg: {}", msg),
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }
}
