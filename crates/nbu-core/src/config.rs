use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::namespace::NamespaceSpec;
use crate::rewrite::PassSpec;

/// Global configuration loaded from `~/.config/nbu/config.toml`.
///
/// The namespace pair and the title lists are ordinary config values, not
/// code constants, so a namespace move only needs a config edit and a rerun.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NbuConfig {
    /// Namespace currently embedded in the bookmark URLs.
    pub old_namespace: String,
    /// Namespace the bookmarks should point at after the pass.
    pub new_namespace: String,
    /// Bookmark titles in scope for rewriting, in processing order.
    pub tracked_titles: Vec<String>,
    /// Tracked titles that are dish units and need composite namespaces.
    pub dish_titles: Vec<String>,
    /// Also rewrite entries whose URL still carries the pre-rename dish
    /// marker. Disable once no bookmarks use the old scheme.
    #[serde(default = "default_true")]
    pub legacy_dish_marker: bool,
    /// Path to the Chromium `Bookmarks` file. None = default profile.
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for NbuConfig {
    fn default() -> Self {
        Self {
            old_namespace: "ci-ska-mid-itf-at-2226-determine-stable-versions".to_string(),
            new_namespace: "staging".to_string(),
            tracked_titles: vec![
                "Telescope".to_string(),
                "TMC".to_string(),
                "CSP Monitoring".to_string(),
                "SDP Integration".to_string(),
                "CBF Overview".to_string(),
                "SDP Signal Displays".to_string(),
                "SKA001".to_string(),
                "SKA036".to_string(),
                "SKA063".to_string(),
                "SKA100".to_string(),
            ],
            dish_titles: vec![
                "SKA001".to_string(),
                "SKA036".to_string(),
                "SKA063".to_string(),
                "SKA100".to_string(),
            ],
            legacy_dish_marker: true,
            store_path: None,
        }
    }
}

impl NbuConfig {
    /// Pass inputs derived from this configuration.
    pub fn pass_spec(&self) -> PassSpec {
        PassSpec {
            old: NamespaceSpec::new(self.old_namespace.clone()),
            new: NamespaceSpec::new(self.new_namespace.clone()),
            tracked_titles: self.tracked_titles.clone(),
            dish_titles: self.dish_titles.iter().cloned().collect(),
            legacy_dish_marker: self.legacy_dish_marker,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("nbu")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<NbuConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = NbuConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: NbuConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = NbuConfig::default();
        assert_eq!(
            cfg.old_namespace,
            "ci-ska-mid-itf-at-2226-determine-stable-versions"
        );
        assert_eq!(cfg.new_namespace, "staging");
        assert_eq!(cfg.tracked_titles.len(), 10);
        assert_eq!(cfg.dish_titles.len(), 4);
        assert!(cfg.legacy_dish_marker);
        assert!(cfg.store_path.is_none());
    }

    #[test]
    fn every_dish_title_is_tracked() {
        let cfg = NbuConfig::default();
        for dish in &cfg.dish_titles {
            assert!(
                cfg.tracked_titles.contains(dish),
                "dish title {} missing from tracked titles",
                dish
            );
        }
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = NbuConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: NbuConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.old_namespace, cfg.old_namespace);
        assert_eq!(parsed.new_namespace, cfg.new_namespace);
        assert_eq!(parsed.tracked_titles, cfg.tracked_titles);
        assert_eq!(parsed.dish_titles, cfg.dish_titles);
        assert_eq!(parsed.legacy_dish_marker, cfg.legacy_dish_marker);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            old_namespace = "staging"
            new_namespace = "ci-ska-mid-itf-foo-bar"
            tracked_titles = ["Telescope", "SKA001"]
            dish_titles = ["SKA001"]
            legacy_dish_marker = false
            store_path = "/tmp/Bookmarks"
        "#;
        let cfg: NbuConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.old_namespace, "staging");
        assert_eq!(cfg.new_namespace, "ci-ska-mid-itf-foo-bar");
        assert_eq!(cfg.tracked_titles, vec!["Telescope", "SKA001"]);
        assert!(!cfg.legacy_dish_marker);
        assert_eq!(cfg.store_path.as_deref(), Some(std::path::Path::new("/tmp/Bookmarks")));
    }

    #[test]
    fn legacy_marker_defaults_on_when_absent() {
        let toml = r#"
            old_namespace = "staging"
            new_namespace = "integration"
            tracked_titles = ["Telescope"]
            dish_titles = []
        "#;
        let cfg: NbuConfig = toml::from_str(toml).unwrap();
        assert!(cfg.legacy_dish_marker);
        assert!(cfg.store_path.is_none());
    }

    #[test]
    fn pass_spec_mirrors_config() {
        let cfg = NbuConfig::default();
        let spec = cfg.pass_spec();
        assert_eq!(spec.old.raw(), cfg.old_namespace);
        assert_eq!(spec.new.raw(), cfg.new_namespace);
        assert_eq!(spec.tracked_titles, cfg.tracked_titles);
        assert!(spec.is_dish("SKA001"));
        assert!(!spec.is_dish("Telescope"));
        assert!(spec.legacy_dish_marker);
    }
}
