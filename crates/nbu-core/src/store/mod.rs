//! Bookmark store abstraction and the bundled backends.
//!
//! The rewriter only needs two operations: find entries by exact title and
//! replace the URL of one entry. `ChromeStore` implements them against a
//! Chromium `Bookmarks` profile file; `MemoryStore` backs tests and dry runs
//! against fixture data.

mod chrome;
mod memory;

pub use chrome::ChromeStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

/// One bookmark as seen by the rewriter.
///
/// `id` is assigned by the store and treated as opaque. Folders match title
/// searches too and carry no URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkEntry {
    pub id: String,
    pub title: String,
    pub url: Option<String>,
}

/// Errors surfaced by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or read.
    #[error("bookmark store unavailable: {0}")]
    Unavailable(String),
    /// No entry with the given id exists.
    #[error("no bookmark with id '{0}'")]
    NotFound(String),
    /// The entry exists but is a folder, which has no URL to replace.
    #[error("bookmark '{0}' is a folder")]
    Folder(String),
}

/// Search/update surface a rewrite pass runs against.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// Every entry whose title equals `title`, folders included.
    async fn search(&self, title: &str) -> Result<Vec<BookmarkEntry>, StoreError>;

    /// Replaces the URL of the entry with id `id` and returns the updated
    /// entry. Fails when the id no longer exists.
    async fn update(&self, id: &str, url: &str) -> Result<BookmarkEntry, StoreError>;
}
