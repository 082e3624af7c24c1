//! Persisted record of the last applied namespace pair (JSON under the XDG
//! state dir) so install/update triggers can skip pairs already handled.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The namespace pair most recently applied by a completed pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedNamespaces {
    pub old_namespace: String,
    pub new_namespace: String,
}

impl AppliedNamespaces {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old_namespace: old.into(),
            new_namespace: new.into(),
        }
    }

    /// True when the configured pair is the one already applied.
    pub fn matches(&self, old: &str, new: &str) -> bool {
        self.old_namespace == old && self.new_namespace == new
    }

    /// Default path for the state file: `~/.local/state/nbu/applied.json`.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("nbu")?;
        Ok(xdg_dirs.get_state_home().join("applied.json"))
    }

    /// Save to the given path (creates the parent dir if needed).
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serialize applied state")?;
        std::fs::write(path, json)
            .with_context(|| format!("write applied state: {}", path.display()))?;
        Ok(())
    }

    /// Load from the given path. A missing file is `None`, not an error.
    pub fn load_from_path(path: &Path) -> Result<Option<Self>> {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("read applied state: {}", path.display()))
            }
        };
        let state: AppliedNamespaces = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse applied state: {}", path.display()))?;
        Ok(Some(state))
    }
}
