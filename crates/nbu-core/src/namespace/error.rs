//! Errors produced while resolving a rewrite directive.

use thiserror::Error;

use super::BRANCH_PREFIX;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A namespace was treated as a branch deployment but does not carry the
    /// branch prefix. Points at a misconfigured namespace pair.
    #[error("namespace '{raw}' lacks the branch prefix '{prefix}'", prefix = BRANCH_PREFIX)]
    MissingBranchPrefix { raw: String },
}
