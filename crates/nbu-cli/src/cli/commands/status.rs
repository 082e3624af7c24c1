//! `nbu status` - show the configured pair, store contents, and applied state.

use anyhow::Result;
use nbu_core::config::NbuConfig;
use nbu_core::logging;
use nbu_core::namespace::resolve_directive;
use nbu_core::rewrite::PassSpec;
use nbu_core::state::AppliedNamespaces;
use nbu_core::store::{BookmarkEntry, BookmarkStore};
use std::path::Path;

use super::{open_store, store_path};

pub async fn run_status(cfg: &NbuConfig, store_flag: Option<&Path>) -> Result<()> {
    let spec = cfg.pass_spec();
    println!(
        "Namespace pair: '{}' ({}) -> '{}' ({})",
        cfg.old_namespace,
        spec.old.category().as_str(),
        cfg.new_namespace,
        spec.new.category().as_str()
    );
    println!(
        "Tracked titles: {} ({} dish)",
        cfg.tracked_titles.len(),
        cfg.dish_titles.len()
    );
    println!(
        "Legacy dish marker: {}",
        if cfg.legacy_dish_marker { "accepted" } else { "off" }
    );

    let path = store_path(cfg, store_flag)?;
    match open_store(cfg, store_flag).await {
        Ok(store) => {
            println!("Store: {}", path.display());
            let mut rows = Vec::new();
            for title in &cfg.tracked_titles {
                match store.search(title).await {
                    Ok(entries) => {
                        for entry in entries {
                            let state = entry_state(&spec, title, &entry);
                            rows.push((entry, state));
                        }
                    }
                    Err(e) => println!("query '{}' failed: {}", title, e),
                }
            }
            if rows.is_empty() {
                println!("No tracked bookmarks in store.");
            } else {
                println!("{:<6} {:<20} {:<8} {}", "ID", "TITLE", "STATE", "URL");
                for (entry, state) in rows {
                    println!(
                        "{:<6} {:<20} {:<8} {}",
                        entry.id,
                        entry.title,
                        state,
                        entry.url.as_deref().unwrap_or("-")
                    );
                }
            }
        }
        Err(e) => println!("Store: {} (unavailable: {:#})", path.display(), e),
    }

    let applied =
        AppliedNamespaces::default_path().and_then(|p| AppliedNamespaces::load_from_path(&p));
    match applied {
        Ok(Some(state)) => println!(
            "Last applied: '{}' -> '{}'",
            state.old_namespace, state.new_namespace
        ),
        _ => println!("Last applied: none recorded"),
    }

    if let Ok(log) = logging::log_path() {
        println!("Log file: {}", log.display());
    }
    Ok(())
}

/// Which side of the configured move the entry's URL sits on.
fn entry_state(spec: &PassSpec, title: &str, entry: &BookmarkEntry) -> &'static str {
    let Some(url) = entry.url.as_deref() else {
        return "folder";
    };
    match resolve_directive(title, spec.is_dish(title), &spec.old, &spec.new) {
        Ok(d) if url.contains(&d.search) => "pending",
        Ok(d) if url.contains(&d.replace) => "applied",
        _ => "other",
    }
}
