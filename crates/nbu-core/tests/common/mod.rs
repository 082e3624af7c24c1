//! Shared fixture helpers for integration tests.

use std::path::Path;

use serde_json::json;

/// Minimal Chromium Bookmarks document: the given `(id, title, url)` entries
/// under the bookmark bar, with the usual empty sibling roots.
pub fn chrome_doc(entries: &[(&str, &str, &str)]) -> serde_json::Value {
    let children: Vec<serde_json::Value> = entries
        .iter()
        .map(|(id, title, url)| {
            json!({
                "date_added": "13350000000000000",
                "guid": format!("00000000-0000-4000-8000-{:0>12}", id),
                "id": id,
                "name": title,
                "type": "url",
                "url": url
            })
        })
        .collect();
    json!({
        "checksum": "0123456789abcdef0123456789abcdef",
        "roots": {
            "bookmark_bar": {
                "children": children,
                "date_added": "13350000000000000",
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

pub fn write_chrome_doc(path: &Path, entries: &[(&str, &str, &str)]) {
    let doc = chrome_doc(entries);
    std::fs::write(path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
}
