//! Per-entry, per-title, and whole-pass result records.

/// What happened to one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    /// URL rewritten and submitted (or reported, in a dry run).
    Updated,
    /// Coarse marker matched but the directive found nothing to replace; the
    /// URL was submitted unchanged.
    Unchanged,
    /// Entry carries no URL (folder).
    SkippedNoUrl,
    /// URL carries no recognized namespace marker.
    SkippedNoMarker,
    /// Directive resolution failed for this entry.
    ResolveFailed,
    /// The store rejected the update.
    UpdateFailed,
}

impl EntryOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryOutcome::Updated => "updated",
            EntryOutcome::Unchanged => "unchanged",
            EntryOutcome::SkippedNoUrl => "skipped (no url)",
            EntryOutcome::SkippedNoMarker => "skipped (no marker)",
            EntryOutcome::ResolveFailed => "resolve failed",
            EntryOutcome::UpdateFailed => "update failed",
        }
    }
}

/// Record of one entry's rewrite.
#[derive(Debug, Clone)]
pub struct EntryReport {
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    /// Rewritten URL, present only for [`EntryOutcome::Updated`].
    pub new_url: Option<String>,
    pub outcome: EntryOutcome,
    /// Failure detail for the failed outcomes.
    pub error: Option<String>,
}

/// Record of one tracked title.
#[derive(Debug, Clone)]
pub struct TitleReport {
    pub title: String,
    /// Store query failure; entries were never seen.
    pub query_error: Option<String>,
    pub entries: Vec<EntryReport>,
}

/// Aggregated outcome of one pass, title order matching the configuration.
#[derive(Debug, Clone)]
pub struct PassSummary {
    pub dry_run: bool,
    pub titles: Vec<TitleReport>,
}

impl PassSummary {
    pub(crate) fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            titles: Vec::new(),
        }
    }

    pub(crate) fn absorb(&mut self, report: TitleReport) {
        self.titles.push(report);
    }

    pub fn entries(&self) -> usize {
        self.titles.iter().map(|t| t.entries.len()).sum()
    }

    pub fn count(&self, outcome: EntryOutcome) -> usize {
        self.titles
            .iter()
            .flat_map(|t| &t.entries)
            .filter(|e| e.outcome == outcome)
            .count()
    }

    pub fn updated(&self) -> usize {
        self.count(EntryOutcome::Updated)
    }

    pub fn unchanged(&self) -> usize {
        self.count(EntryOutcome::Unchanged)
    }

    pub fn skipped(&self) -> usize {
        self.count(EntryOutcome::SkippedNoUrl) + self.count(EntryOutcome::SkippedNoMarker)
    }

    /// Failed entries plus titles whose query itself failed.
    pub fn failed(&self) -> usize {
        self.count(EntryOutcome::ResolveFailed)
            + self.count(EntryOutcome::UpdateFailed)
            + self
                .titles
                .iter()
                .filter(|t| t.query_error.is_some())
                .count()
    }

    /// Tracked titles that matched no bookmarks at all.
    pub fn unmatched_titles(&self) -> Vec<&str> {
        self.titles
            .iter()
            .filter(|t| t.query_error.is_none() && t.entries.is_empty())
            .map(|t| t.title.as_str())
            .collect()
    }
}
