//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/tagtree/tagtree.toml`
//! 3. Explicit config: file passed with `--config`
//! 4. Environment variables: `TAGTREE_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::Vocabulary;

/// Table tags used by `bold-row`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    pub row_tag: String,
    pub cell_tag: String,
    /// Tag inserted under each cell of the selected row
    pub bold_tag: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_tag: "tr".into(),
            cell_tag: "td".into(),
            bold_tag: "b".into(),
        }
    }
}

/// Tags accepted by `remove`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RemoveConfig {
    /// Formatting tags replaced by their children
    pub simple: Vec<String>,
    /// List containers replaced by their children, items become paragraphs
    pub list: Vec<String>,
}

impl Default for RemoveConfig {
    fn default() -> Self {
        Self {
            simple: vec!["b".into(), "em".into(), "p".into()],
            list: vec!["ol".into(), "ul".into()],
        }
    }
}

/// List item handling for list removal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListConfig {
    pub item_tag: String,
    pub item_replacement: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            item_tag: "li".into(),
            item_replacement: "p".into(),
        }
    }
}

/// Word matching for `add-tag`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WordConfig {
    /// Marks that may trail a word and are wrapped with it
    pub punctuation: String,
}

impl Default for WordConfig {
    fn default() -> Self {
        Self {
            punctuation: ".,?!;:".into(),
        }
    }
}

/// Raw remove config for intermediate parsing (arrays are Option to detect "not specified").
///
/// Used during layered config merging to distinguish between:
/// - `None` → field not specified, inherit from base
/// - `Some([])` → explicit empty array
/// - `Some([...])` → explicit values to merge
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRemoveConfig {
    pub simple: Option<Vec<String>>,
    pub list: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTableConfig {
    pub row_tag: Option<String>,
    pub cell_tag: Option<String>,
    pub bold_tag: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawListConfig {
    pub item_tag: Option<String>,
    pub item_replacement: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawWordConfig {
    pub punctuation: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub table: RawTableConfig,
    pub remove: RawRemoveConfig,
    pub list: RawListConfig,
    pub word: RawWordConfig,
}

impl RemoveConfig {
    /// Merge arrays with union semantics and negation support.
    ///
    /// - Items from overlay are added to base
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are de-duplicated
    ///
    /// # Examples
    /// ```ignore
    /// merge_array(&["b", "em"], &["strong"]) // → ["b", "em", "strong"]
    /// merge_array(&["b", "em"], &["!b"])     // → ["em"]
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: HashSet<String> = base.iter().cloned().collect();

        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                result.remove(negated);
            } else {
                result.insert(pattern.clone());
            }
        }

        // Convert to sorted Vec for deterministic output
        let mut vec: Vec<String> = result.into_iter().collect();
        vec.sort();
        vec
    }

    /// Merge overlay onto self with union semantics (if overlay specified).
    pub fn merge(&self, overlay: &RawRemoveConfig) -> Self {
        Self {
            simple: overlay
                .simple
                .as_ref()
                .map(|o| Self::merge_array(&self.simple, o))
                .unwrap_or_else(|| self.simple.clone()),
            list: overlay
                .list
                .as_ref()
                .map(|o| Self::merge_array(&self.list, o))
                .unwrap_or_else(|| self.list.clone()),
        }
    }

    /// Apply global config onto defaults.
    ///
    /// Unlike `merge()` this uses REPLACE semantics: an array given in the
    /// global config completely replaces the default array.
    pub fn apply_global(&self, global: &RawRemoveConfig) -> Self {
        Self {
            simple: global.simple.clone().unwrap_or_else(|| self.simple.clone()),
            list: global.list.clone().unwrap_or_else(|| self.list.clone()),
        }
    }
}

/// Unified configuration for tagtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub table: TableConfig,
    pub remove: RemoveConfig,
    pub list: ListConfig,
    pub word: WordConfig,
}

/// Get the XDG config directory for tagtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tagtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("tagtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Scalars: overlay wins if given. Arrays: REPLACE when `replace`, else UNION.
    fn layer(&self, overlay: &RawSettings, replace: bool) -> Self {
        let pick = |over: &Option<String>, base: &String| over.clone().unwrap_or_else(|| base.clone());
        Self {
            table: TableConfig {
                row_tag: pick(&overlay.table.row_tag, &self.table.row_tag),
                cell_tag: pick(&overlay.table.cell_tag, &self.table.cell_tag),
                bold_tag: pick(&overlay.table.bold_tag, &self.table.bold_tag),
            },
            remove: if replace {
                self.remove.apply_global(&overlay.remove)
            } else {
                self.remove.merge(&overlay.remove)
            },
            list: ListConfig {
                item_tag: pick(&overlay.list.item_tag, &self.list.item_tag),
                item_replacement: pick(&overlay.list.item_replacement, &self.list.item_replacement),
            },
            word: WordConfig {
                punctuation: pick(&overlay.word.punctuation, &self.word.punctuation),
            },
        }
    }

    /// Merge overlay config onto self (base) with union semantics for arrays.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        self.layer(overlay, false)
    }

    /// Apply global config onto defaults with REPLACE semantics for arrays.
    ///
    /// Defaults are just examples; the global config defines the real
    /// baseline for the user.
    pub fn apply_global(&self, global: &RawSettings) -> Self {
        self.layer(global, true)
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; must exist
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE (global defines the real baseline)
    /// - Global → Explicit: UNION with negation support
    /// - Any → Env vars: REPLACE (explicit user override)
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Load global config (REPLACES defaults)
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        // 3. Merge explicit config (UNION with global)
        if let Some(path) = explicit {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Apply environment variables (replaces - explicit override)
        Self::apply_env_overrides(current)
    }

    /// Apply TAGTREE_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__`, lists use `,`: `TAGTREE_REMOVE__SIMPLE=b,i`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("TAGTREE")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("remove.simple")
                .with_list_parse_key("remove.list"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("table.row_tag") {
            settings.table.row_tag = val;
        }
        if let Ok(val) = config.get_string("table.cell_tag") {
            settings.table.cell_tag = val;
        }
        if let Ok(val) = config.get_string("table.bold_tag") {
            settings.table.bold_tag = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("remove.simple") {
            settings.remove.simple = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("remove.list") {
            settings.remove.list = val;
        }
        if let Ok(val) = config.get_string("list.item_tag") {
            settings.list.item_tag = val;
        }
        if let Ok(val) = config.get_string("list.item_replacement") {
            settings.list.item_replacement = val;
        }
        if let Ok(val) = config.get_string("word.punctuation") {
            settings.word.punctuation = val;
        }

        Ok(settings)
    }

    /// Tag vocabulary for the rewrites.
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary {
            row_tag: self.table.row_tag.clone(),
            cell_tag: self.table.cell_tag.clone(),
            bold_tag: self.table.bold_tag.clone(),
            simple_remove: self.remove.simple.clone(),
            list_remove: self.remove.list.clone(),
            list_item: self.list.item_tag.clone(),
            list_item_replacement: self.list.item_replacement.clone(),
            punctuation: self.word.punctuation.clone(),
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# tagtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/tagtree/tagtree.toml  (defines your baseline)
#   Explicit: tagtree --config <file>         (per-run additions)
#   Env:      TAGTREE_* environment variables (explicit overrides)
#
# Array Merge Semantics:
#   Global config REPLACES compiled defaults.
#   Explicit config UNIONS with global.
#   Use "!tag" in the explicit config to REMOVE an inherited item:
#     simple = ["strong", "!p"]  # adds strong, no longer removes p

[table]
# row_tag = "tr"
# cell_tag = "td"
# bold_tag = "b"

[remove]
# Formatting tags replaced by their children
# simple = ["b", "em", "p"]
# List containers; their items become paragraphs
# list = ["ol", "ul"]

[list]
# item_tag = "li"
# item_replacement = "p"

[word]
# Marks that may trail a matched word
# punctuation = ".,?!;:"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_defaults_when_converting_then_vocabulary_matches_domain_default() {
        assert_eq!(Settings::default().vocabulary(), Vocabulary::default());
    }

    #[test]
    fn test_merge_array_union() {
        let result = RemoveConfig::merge_array(&strings(&["b", "em"]), &strings(&["strong"]));
        assert_eq!(result, strings(&["b", "em", "strong"]));
    }

    #[test]
    fn test_merge_array_negation() {
        let result = RemoveConfig::merge_array(&strings(&["b", "em", "p"]), &strings(&["!p", "i"]));
        assert_eq!(result, strings(&["b", "em", "i"]));
    }

    #[test]
    fn test_merge_array_duplicates() {
        let result = RemoveConfig::merge_array(&strings(&["b"]), &strings(&["b", "b"]));
        assert_eq!(result, strings(&["b"]));
    }

    #[test]
    fn test_apply_global_replaces_arrays() {
        let raw: RawSettings = toml::from_str("[remove]\nsimple = [\"strong\"]\n").unwrap();
        let settings = Settings::default().apply_global(&raw);
        assert_eq!(settings.remove.simple, strings(&["strong"]));
        assert_eq!(settings.remove.list, strings(&["ol", "ul"]));
    }

    #[test]
    fn test_merge_with_unions_arrays_and_overrides_scalars() {
        let raw: RawSettings = toml::from_str(
            "[table]\nbold_tag = \"strong\"\n[remove]\nsimple = [\"i\", \"!p\"]\n",
        )
        .unwrap();
        let settings = Settings::default().merge_with(&raw);
        assert_eq!(settings.table.bold_tag, "strong");
        assert_eq!(settings.table.row_tag, "tr");
        assert_eq!(settings.remove.simple, strings(&["b", "em", "i"]));
    }

    #[test]
    fn given_settings_when_serializing_then_toml_round_trips() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsing_then_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.remove.simple.is_none());
    }
}
