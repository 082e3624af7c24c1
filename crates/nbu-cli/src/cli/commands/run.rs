//! `nbu run` - rewrite tracked bookmarks in the configured store.

use anyhow::Result;
use nbu_core::config::NbuConfig;
use nbu_core::rewrite::{self, EntryOutcome};
use nbu_core::state::AppliedNamespaces;
use std::path::Path;

use super::open_store;

pub async fn run_rewrite(
    cfg: &NbuConfig,
    store_flag: Option<&Path>,
    if_changed: bool,
) -> Result<()> {
    if if_changed {
        // A corrupt or missing state file never blocks the run.
        let applied = AppliedNamespaces::default_path()
            .and_then(|p| AppliedNamespaces::load_from_path(&p));
        if let Ok(Some(applied)) = applied {
            if applied.matches(&cfg.old_namespace, &cfg.new_namespace) {
                tracing::info!(
                    "pair '{}' -> '{}' already applied",
                    cfg.old_namespace,
                    cfg.new_namespace
                );
                println!("Namespace pair already applied; nothing to do.");
                return Ok(());
            }
        }
    }

    let store = open_store(cfg, store_flag).await?;
    let spec = cfg.pass_spec();
    let summary = rewrite::run_pass(store, &spec, false).await?;

    println!(
        "{} updated, {} unchanged, {} skipped, {} failed",
        summary.updated(),
        summary.unchanged(),
        summary.skipped(),
        summary.failed()
    );
    for title in summary.unmatched_titles() {
        println!("  no bookmarks titled '{}'", title);
    }
    for title in &summary.titles {
        if let Some(err) = &title.query_error {
            println!("  query '{}' failed: {}", title.title, err);
        }
        for entry in &title.entries {
            if matches!(
                entry.outcome,
                EntryOutcome::ResolveFailed | EntryOutcome::UpdateFailed
            ) {
                println!(
                    "  {} '{}' ({}): {}",
                    entry.outcome.as_str(),
                    entry.title,
                    entry.id,
                    entry.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }

    if summary.failed() == 0 {
        let state = AppliedNamespaces::new(cfg.old_namespace.clone(), cfg.new_namespace.clone());
        if let Ok(path) = AppliedNamespaces::default_path() {
            if state.save_to_path(&path).is_err() {
                tracing::warn!("could not save applied state to {}", path.display());
            }
        }
    } else {
        tracing::warn!(
            "{} failure(s); applied state not recorded so a rerun retries them",
            summary.failed()
        );
    }
    Ok(())
}
