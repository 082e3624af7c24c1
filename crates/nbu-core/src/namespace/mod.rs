//! Namespace modeling and rewrite-directive resolution.
//!
//! Deployment URLs embed a Kubernetes namespace segment. Two kinds exist:
//! persistent environments (`staging`, `integration`, ...) and on-demand
//! branch deployments, recognizable by the literal `ci-ska-mid-itf-` prefix.
//! Dish bookmarks point at per-dish namespaces (`<env>-dish-lmc-<id>` or
//! `ci-dish-lmc-<id>-<branch>`), so their substitution strings are composed
//! per entry instead of being the raw namespace itself.

mod directive;
mod error;

pub use directive::{resolve_directive, RewriteDirective};
pub use error::ResolveError;

/// Literal prefix that marks a namespace as a branch deployment.
pub const BRANCH_PREFIX: &str = "ci-ska-mid-itf-";

/// Namespace segment shared by all dish deployments.
const DISH_SEGMENT: &str = "dish-lmc";

/// Marker accepted by the coarse URL filter for bookmarks still carrying a
/// pre-rename dish namespace. Same literal as the branch-style dish prefix.
pub const LEGACY_DISH_MARKER: &str = "ci-dish-lmc";

/// Kind of deployment a namespace refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceCategory {
    /// Persistent named environment (staging, integration, ...).
    Environment,
    /// On-demand deployment for one CI branch.
    Branch,
}

impl NamespaceCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            NamespaceCategory::Environment => "environment",
            NamespaceCategory::Branch => "branch",
        }
    }
}

/// One configured namespace (the old or the new side of a rewrite).
///
/// The category is derived from the raw string on every call rather than
/// stored, so it can never go stale against `raw`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSpec {
    raw: String,
}

impl NamespaceSpec {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Branch iff the raw string starts with [`BRANCH_PREFIX`].
    pub fn category(&self) -> NamespaceCategory {
        if self.raw.starts_with(BRANCH_PREFIX) {
            NamespaceCategory::Branch
        } else {
            NamespaceCategory::Environment
        }
    }

    /// Branch name with the literal prefix stripped.
    ///
    /// Fails when the prefix is absent instead of slicing at a fixed offset,
    /// so a prefix mismatch surfaces as an error rather than a mangled
    /// suffix.
    pub fn branch_suffix(&self) -> Result<&str, ResolveError> {
        self.raw
            .strip_prefix(BRANCH_PREFIX)
            .ok_or_else(|| ResolveError::MissingBranchPrefix {
                raw: self.raw.clone(),
            })
    }
}
