//! Layered selection settings
//!
//! Settings are loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `STOCKPILE_CATEGORIES`, `STOCKPILE_MARKED_ONLY`
//! 2. Project-local: `.stockpile/config.toml`
//! 3. Global: `~/.stockpile/config.toml`
//!
//! Command-line flags are applied on top by the caller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use stockpile_core::{AssetCategory, Result, StockpileError};

pub const CATEGORIES_ENV: &str = "STOCKPILE_CATEGORIES";
pub const MARKED_ONLY_ENV: &str = "STOCKPILE_MARKED_ONLY";

/// `[import]` table of a config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSection {
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub marked_only: Option<bool>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub import: ImportSection,
}

/// The category toggles and marked-only flag an import runs with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSettings {
    pub categories: BTreeSet<AssetCategory>,
    pub marked_only: bool,
}

impl ImportSettings {
    /// Load settings with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        Self::load_layered(
            Self::global_config_path().as_deref(),
            Path::new(".stockpile/config.toml"),
            |key| std::env::var(key).ok(),
        )
    }

    /// Load from explicit layer locations and an environment lookup
    pub fn load_layered(
        global_path: Option<&Path>,
        local_path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut section = ImportSection::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                let global = Self::load_file(global_path)?;
                Self::merge_into(&mut section, global.import);
            }
        }

        if local_path.exists() {
            let local = Self::load_file(local_path)?;
            Self::merge_into(&mut section, local.import);
        }

        Self::apply_env_overrides(&mut section, env)?;
        Self::resolve(section)
    }

    /// Load settings from a specific file path only
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let file = Self::load_file(path)?;
        Self::resolve(file.import)
    }

    /// Select every category
    pub fn select_all(&mut self) {
        self.categories = AssetCategory::ALL.into_iter().collect();
    }

    /// Replace the selection
    pub fn select(&mut self, categories: impl IntoIterator<Item = AssetCategory>) {
        self.categories = categories.into_iter().collect();
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".stockpile").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<SettingsFile> {
        let content = std::fs::read_to_string(path)?;
        let file: SettingsFile = toml::from_str(&content).map_err(|e| {
            StockpileError::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        Ok(file)
    }

    fn merge_into(base: &mut ImportSection, overlay: ImportSection) {
        if overlay.categories.is_some() {
            base.categories = overlay.categories;
        }
        if overlay.marked_only.is_some() {
            base.marked_only = overlay.marked_only;
        }
    }

    fn apply_env_overrides(
        section: &mut ImportSection,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        if let Some(list) = env(CATEGORIES_ENV) {
            section.categories = Some(
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            );
        }
        if let Some(flag) = env(MARKED_ONLY_ENV) {
            section.marked_only = Some(parse_flag(&flag).ok_or_else(|| {
                StockpileError::Config(format!(
                    "{} must be a boolean (1/0, true/false, yes/no, on/off), got '{}'",
                    MARKED_ONLY_ENV, flag
                ))
            })?);
        }
        Ok(())
    }

    fn resolve(section: ImportSection) -> Result<Self> {
        let mut categories = BTreeSet::new();
        for id in section.categories.unwrap_or_default() {
            let category = id.parse::<AssetCategory>().map_err(|_| {
                StockpileError::Config(format!("unknown asset category '{}'", id))
            })?;
            categories.insert(category);
        }
        Ok(Self {
            categories,
            marked_only: section.marked_only.unwrap_or(false),
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stockpile_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_select_nothing() {
        let dir = temp_dir();
        let settings =
            ImportSettings::load_layered(None, &dir.join("missing.toml"), no_env).unwrap();
        assert!(settings.categories.is_empty());
        assert!(!settings.marked_only);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_file() {
        let dir = temp_dir();
        let path = dir.join("config.toml");
        fs::write(
            &path,
            r#"
[import]
categories = ["meshes", "node_groups"]
marked_only = true
"#,
        )
        .unwrap();

        let settings = ImportSettings::load_from_file(&path).unwrap();
        assert!(settings.marked_only);
        assert_eq!(
            settings.categories.into_iter().collect::<Vec<_>>(),
            vec![AssetCategory::Meshes, AssetCategory::NodeGroups]
        );
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_layer_precedence() {
        let dir = temp_dir();
        let global = dir.join("global.toml");
        let local = dir.join("local.toml");
        fs::write(
            &global,
            "[import]\ncategories = [\"worlds\"]\nmarked_only = true\n",
        )
        .unwrap();
        fs::write(&local, "[import]\ncategories = [\"materials\"]\n").unwrap();

        let settings = ImportSettings::load_layered(Some(&global), &local, no_env).unwrap();
        assert_eq!(
            settings.categories.iter().copied().collect::<Vec<_>>(),
            vec![AssetCategory::Materials]
        );
        assert!(settings.marked_only);

        let env: HashMap<&str, &str> = [
            (CATEGORIES_ENV, "textures, images"),
            (MARKED_ONLY_ENV, "off"),
        ]
        .into_iter()
        .collect();
        let settings = ImportSettings::load_layered(Some(&global), &local, |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap();
        assert_eq!(
            settings.categories.iter().copied().collect::<Vec<_>>(),
            vec![AssetCategory::Textures, AssetCategory::Images]
        );
        assert!(!settings.marked_only);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_category_is_config_error() {
        let dir = temp_dir();
        let path = dir.join("config.toml");
        fs::write(&path, "[import]\ncategories = [\"sounds\"]\n").unwrap();

        let err = ImportSettings::load_from_file(&path).unwrap_err();
        assert!(matches!(err, StockpileError::Config(msg) if msg.contains("sounds")));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_file_names_its_path() {
        let dir = temp_dir();
        let path = dir.join("config.toml");
        fs::write(&path, "[import\ncategories = ").unwrap();

        let err = ImportSettings::load_from_file(&path).unwrap_err();
        assert!(matches!(err, StockpileError::Config(msg) if msg.contains("config.toml")));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_bad_env_flag() {
        let dir = temp_dir();
        let err = ImportSettings::load_layered(None, &dir.join("none.toml"), |key| {
            (key == MARKED_ONLY_ENV).then(|| "maybe".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, StockpileError::Config(_)));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_select_all() {
        let mut settings = ImportSettings::default();
        settings.select_all();
        assert_eq!(settings.categories.len(), AssetCategory::COUNT);
        settings.select([AssetCategory::Scenes]);
        assert_eq!(settings.categories.len(), 1);
    }
}
