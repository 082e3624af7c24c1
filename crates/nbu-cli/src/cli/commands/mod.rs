//! CLI command handlers, one file per command.

mod plan;
mod run;
mod status;

pub use plan::run_plan;
pub use run::run_rewrite;
pub use status::run_status;

use anyhow::{Context, Result};
use nbu_core::config::NbuConfig;
use nbu_core::store::ChromeStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Store path precedence: CLI flag, then config, then the default profile.
fn store_path(cfg: &NbuConfig, flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = flag {
        return Ok(p.to_path_buf());
    }
    if let Some(p) = &cfg.store_path {
        return Ok(p.clone());
    }
    Ok(ChromeStore::default_path()?)
}

/// Open the bookmarks file the command will operate on.
async fn open_store(cfg: &NbuConfig, flag: Option<&Path>) -> Result<Arc<ChromeStore>> {
    let path = store_path(cfg, flag)?;
    let store = ChromeStore::load(&path)
        .await
        .with_context(|| format!("open bookmark store: {}", path.display()))?;
    Ok(Arc::new(store))
}
