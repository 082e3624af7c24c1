//! Rewrite pass over the tracked bookmark titles.
//!
//! One pass queries the store for every tracked title, filters entries by a
//! coarse namespace marker, resolves a per-entry directive, and submits the
//! rewritten URLs. Titles run as independent tasks in unordered flight; a
//! failing title or entry never blocks the rest, and nothing is retried.

mod outcome;
mod pass;


pub use outcome::{EntryOutcome, EntryReport, PassSummary, TitleReport};
pub use pass::run_pass;

use std::collections::BTreeSet;

use crate::namespace::{NamespaceSpec, LEGACY_DISH_MARKER};

/// Inputs for one rewrite pass. Assembled from configuration by the caller
/// so tests can run arbitrary pairings without touching global state.
#[derive(Debug, Clone)]
pub struct PassSpec {
    pub old: NamespaceSpec,
    pub new: NamespaceSpec,
    /// Titles in scope, processed in this order for stable summaries.
    pub tracked_titles: Vec<String>,
    /// Tracked titles that need per-dish namespace composition.
    pub dish_titles: BTreeSet<String>,
    /// Also accept URLs still carrying the pre-rename dish marker.
    pub legacy_dish_marker: bool,
}

impl PassSpec {
    /// Case-sensitive dish membership.
    pub fn is_dish(&self, title: &str) -> bool {
        self.dish_titles.contains(title)
    }

    /// Coarse filter: does the URL plausibly reference the old namespace?
    ///
    /// Entries failing this never reach the store's update operation.
    pub fn coarse_match(&self, url: &str) -> bool {
        url.contains(self.old.raw()) || (self.legacy_dish_marker && url.contains(LEGACY_DISH_MARKER))
    }
}
