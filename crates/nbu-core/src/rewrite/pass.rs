//! Pass execution: one task per title, one decision per entry.

use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinSet;

use crate::namespace::resolve_directive;
use crate::store::{BookmarkEntry, BookmarkStore};

use super::outcome::{EntryOutcome, EntryReport, PassSummary, TitleReport};
use super::PassSpec;

/// Runs one full rewrite pass against `store`.
///
/// Titles are queried concurrently and completion order is unspecified;
/// correctness does not depend on it because entries never share state. The
/// returned summary lists titles in configuration order regardless. With
/// `dry_run` set, the pass reports what it would change without calling the
/// store's update operation.
pub async fn run_pass<S>(store: Arc<S>, spec: &PassSpec, dry_run: bool) -> Result<PassSummary>
where
    S: BookmarkStore + ?Sized + 'static,
{
    tracing::debug!(
        "rewrite pass: '{}' -> '{}', {} title(s)",
        spec.old.raw(),
        spec.new.raw(),
        spec.tracked_titles.len()
    );

    let mut join_set = JoinSet::new();
    for (idx, title) in spec.tracked_titles.iter().enumerate() {
        let store = Arc::clone(&store);
        let spec = spec.clone();
        let title = title.clone();
        join_set.spawn(async move {
            let report = run_title(store.as_ref(), &spec, &title, dry_run).await;
            (idx, report)
        });
    }

    let mut reports: Vec<(usize, TitleReport)> = Vec::with_capacity(spec.tracked_titles.len());
    while let Some(res) = join_set.join_next().await {
        let indexed = res.map_err(|e| anyhow::anyhow!("title task join: {}", e))?;
        reports.push(indexed);
    }
    reports.sort_by_key(|(idx, _)| *idx);

    let mut summary = PassSummary::new(dry_run);
    for (_, report) in reports {
        summary.absorb(report);
    }
    tracing::info!(
        dry_run,
        "pass complete: {} updated, {} unchanged, {} skipped, {} failed",
        summary.updated(),
        summary.unchanged(),
        summary.skipped(),
        summary.failed()
    );
    Ok(summary)
}

async fn run_title<S>(store: &S, spec: &PassSpec, title: &str, dry_run: bool) -> TitleReport
where
    S: BookmarkStore + ?Sized,
{
    let entries = match store.search(title).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("query '{}' failed: {}", title, e);
            return TitleReport {
                title: title.to_string(),
                query_error: Some(e.to_string()),
                entries: Vec::new(),
            };
        }
    };
    if entries.is_empty() {
        tracing::debug!("no bookmarks titled '{}'", title);
    }

    let mut reports = Vec::with_capacity(entries.len());
    for entry in entries {
        reports.push(rewrite_entry(store, spec, title, entry, dry_run).await);
    }
    TitleReport {
        title: title.to_string(),
        query_error: None,
        entries: reports,
    }
}

async fn rewrite_entry<S>(
    store: &S,
    spec: &PassSpec,
    title: &str,
    entry: BookmarkEntry,
    dry_run: bool,
) -> EntryReport
where
    S: BookmarkStore + ?Sized,
{
    let Some(url) = entry.url.clone() else {
        tracing::debug!("'{}' ({}): no URL, skipping", title, entry.id);
        return report(entry, None, EntryOutcome::SkippedNoUrl, None);
    };
    if !spec.coarse_match(&url) {
        tracing::debug!("'{}' ({}): no namespace marker in URL, skipping", title, entry.id);
        return report(entry, None, EntryOutcome::SkippedNoMarker, None);
    }

    let directive = match resolve_directive(title, spec.is_dish(title), &spec.old, &spec.new) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!("'{}' ({}): {}", title, entry.id, e);
            return report(entry, None, EntryOutcome::ResolveFailed, Some(e.to_string()));
        }
    };

    let (submit_url, outcome) = match directive.apply_once(&url) {
        Some(rewritten) => (rewritten, EntryOutcome::Updated),
        // Coarse marker hit without a directive match; submitted as-is.
        None => (url.clone(), EntryOutcome::Unchanged),
    };
    let new_url = match outcome {
        EntryOutcome::Updated => Some(submit_url.clone()),
        _ => None,
    };

    if dry_run {
        if outcome == EntryOutcome::Updated {
            tracing::info!("'{}' ({}): would rewrite {} -> {}", title, entry.id, url, submit_url);
        }
        return report(entry, new_url, outcome, None);
    }

    match store.update(&entry.id, &submit_url).await {
        Ok(_) => {
            match outcome {
                EntryOutcome::Updated => {
                    tracing::info!("'{}' ({}): rewrote {} -> {}", title, entry.id, url, submit_url);
                }
                _ => {
                    tracing::debug!("'{}' ({}): marker matched but directive did not", title, entry.id);
                }
            }
            report(entry, new_url, outcome, None)
        }
        Err(e) => {
            tracing::warn!("'{}' ({}): update failed: {}", title, entry.id, e);
            report(entry, new_url, EntryOutcome::UpdateFailed, Some(e.to_string()))
        }
    }
}

fn report(
    entry: BookmarkEntry,
    new_url: Option<String>,
    outcome: EntryOutcome,
    error: Option<String>,
) -> EntryReport {
    EntryReport {
        id: entry.id,
        title: entry.title,
        url: entry.url,
        new_url,
        outcome,
        error,
    }
}
