//! `nbu plan` - dry-run report of what a rewrite pass would change.

use anyhow::Result;
use nbu_core::config::NbuConfig;
use nbu_core::rewrite::{self, EntryOutcome};
use std::path::Path;

use super::open_store;

pub async fn run_plan(cfg: &NbuConfig, store_flag: Option<&Path>) -> Result<()> {
    let store = open_store(cfg, store_flag).await?;
    let spec = cfg.pass_spec();
    let summary = rewrite::run_pass(store, &spec, true).await?;

    if summary.updated() == 0 {
        println!("No bookmark URLs would change.");
        return Ok(());
    }

    println!("{} bookmark URL(s) would change:", summary.updated());
    for title in &summary.titles {
        for entry in &title.entries {
            if entry.outcome != EntryOutcome::Updated {
                continue;
            }
            println!("  '{}' ({})", entry.title, entry.id);
            println!(
                "    {} -> {}",
                entry.url.as_deref().unwrap_or("-"),
                entry.new_url.as_deref().unwrap_or("-")
            );
        }
    }
    Ok(())
}
