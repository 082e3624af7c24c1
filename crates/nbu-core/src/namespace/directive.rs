//! Turns a namespace pair plus one bookmark title into a concrete
//! search/replace instruction.

use super::{NamespaceCategory, NamespaceSpec, ResolveError, DISH_SEGMENT};

/// Literal substitution to perform on a bookmark URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteDirective {
    pub search: String,
    pub replace: String,
}

impl RewriteDirective {
    /// Replaces the first occurrence of `search`, or `None` when the URL
    /// does not contain it. Later occurrences are left alone.
    pub fn apply_once(&self, url: &str) -> Option<String> {
        if !url.contains(&self.search) {
            return None;
        }
        Some(url.replacen(&self.search, &self.replace, 1))
    }
}

/// Builds the directive for one entry.
///
/// Plain entries substitute the raw namespaces directly. Dish entries embed
/// the dish id (the lowercased bookmark title) in both sides, because each
/// dish runs in its own namespace:
///
/// * environment side: `<env>-dish-lmc-<id>`
/// * branch side: `ci-dish-lmc-<id>-<branch>`
pub fn resolve_directive(
    title: &str,
    is_dish: bool,
    old: &NamespaceSpec,
    new: &NamespaceSpec,
) -> Result<RewriteDirective, ResolveError> {
    if !is_dish {
        return Ok(RewriteDirective {
            search: old.raw().to_string(),
            replace: new.raw().to_string(),
        });
    }

    let dish_id = title.to_ascii_lowercase();
    Ok(RewriteDirective {
        search: dish_namespace(old, &dish_id)?,
        replace: dish_namespace(new, &dish_id)?,
    })
}

fn dish_namespace(spec: &NamespaceSpec, dish_id: &str) -> Result<String, ResolveError> {
    match spec.category() {
        NamespaceCategory::Environment => {
            Ok(format!("{}-{}-{}", spec.raw(), DISH_SEGMENT, dish_id))
        }
        NamespaceCategory::Branch => {
            let branch = spec.branch_suffix()?;
            Ok(format!("ci-{}-{}-{}", DISH_SEGMENT, dish_id, branch))
        }
    }
}
