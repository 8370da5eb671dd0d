//! Configuration loading for buff and card definitions
//!
//! Definitions are loaded from TOML files in two locations:
//! - **Builtin**: Shipped with the game content (read-only)
//! - **Custom**: User-created definitions (editable)
//!
//! Custom files load last, so a custom definition replaces a builtin one with
//! the same id.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use stackbuff_types::{BuffDefinition, CardDefinition, DefinitionConfig};
use thiserror::Error;

/// Combined set of buff and card definitions
#[derive(Debug, Clone, Default)]
pub struct DefinitionSet {
    /// All buff definitions, keyed by ID
    pub buffs: HashMap<String, BuffDefinition>,

    /// All card definitions, keyed by ID
    pub cards: HashMap<String, CardDefinition>,
}

impl DefinitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add definitions from a config, returns IDs of any duplicates
    pub fn add_config(&mut self, config: DefinitionConfig) -> Vec<String> {
        let mut duplicates = Vec::new();

        for buff in config.buffs {
            if self.buffs.contains_key(&buff.id) {
                duplicates.push(buff.id.clone());
            }
            self.buffs.insert(buff.id.clone(), buff);
        }

        for card in config.cards {
            if self.cards.contains_key(&card.id) {
                duplicates.push(card.id.clone());
            }
            self.cards.insert(card.id.clone(), card);
        }

        duplicates
    }

    pub fn buff(&self, id: &str) -> Option<&BuffDefinition> {
        self.buffs.get(id)
    }

    pub fn card(&self, id: &str) -> Option<&CardDefinition> {
        self.cards.get(id)
    }

    pub fn enabled_buffs(&self) -> impl Iterator<Item = &BuffDefinition> {
        self.buffs.values().filter(|def| def.enabled)
    }

    /// Buff ids a card references that have no definition
    pub fn missing_buffs<'a>(&'a self, card: &'a CardDefinition) -> impl Iterator<Item = &'a str> {
        card.buffs
            .iter()
            .filter(|id| !self.buffs.contains_key(id.as_str()))
            .map(String::as_str)
    }
}

/// Load definitions from builtin and custom config directories.
///
/// Builtin definitions are loaded first, then custom definitions. Missing
/// directories are skipped. A file that fails to load is logged and skipped;
/// only an unreadable directory is an error.
pub fn load_definitions(
    builtin_dir: Option<&Path>,
    custom_dir: Option<&Path>,
) -> Result<DefinitionSet, ConfigError> {
    let mut set = DefinitionSet::new();

    if let Some(dir) = builtin_dir
        && dir.exists()
    {
        load_directory(&mut set, dir, "builtin")?;
    }

    if let Some(dir) = custom_dir
        && dir.exists()
    {
        load_directory(&mut set, dir, "custom")?;
    }

    tracing::info!(
        buffs = set.buffs.len(),
        cards = set.cards.len(),
        "Loaded definitions"
    );
    Ok(set)
}

/// Load all TOML files from a directory, in file name order
fn load_directory(set: &mut DefinitionSet, dir: &Path, source: &str) -> Result<(), ConfigError> {
    let entries = fs::read_dir(dir).map_err(|e| ConfigError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    for path in paths {
        match load_file(&path) {
            Ok(config) => {
                let duplicates = set.add_config(config);
                if !duplicates.is_empty() {
                    tracing::warn!(
                        source,
                        file = ?path.file_name(),
                        ?duplicates,
                        "Duplicate definition IDs"
                    );
                }
            }
            Err(e) => {
                tracing::error!(source, file = ?path.file_name(), error = %e, "Failed to load definitions");
            }
        }
    }

    Ok(())
}

/// Load a single TOML config file
pub fn load_file(path: &Path) -> Result<DefinitionConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save a config to a TOML file
pub fn save_file(path: &Path, config: &DefinitionConfig) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config).map_err(|e| ConfigError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;

    fs::write(path, contents).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Get the default builtin definitions directory
pub fn default_builtin_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("definitions").join("builtin")))
}

/// Get the default custom definitions directory
pub fn default_custom_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("stackbuff").join("definitions"))
}

/// Errors that can occur during config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        source: toml::ser::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILTIN: &str = r#"
[[buff]]
id = "double_slots"
name = "Double Slots"
duration = { turns = 3 }
can_stack_effect = true
effect = { kind = "score", per_slot_delta = 10 }

[[buff]]
id = "old_buff"
name = "Retired"
enabled = false
effect = { kind = "score", per_slot_delta = 1 }

[[card]]
id = "lucky_card"
title = "Lucky Card"
buffs = ["double_slots", "no_such_buff"]
"#;

    const CUSTOM: &str = r#"
[[buff]]
id = "double_slots"
name = "Triple Slots"
duration = { turns = 3 }
effect = { kind = "score", per_slot_delta = 20 }
"#;

    #[test]
    fn test_custom_overrides_builtin() {
        let builtin = tempfile::tempdir().unwrap();
        let custom = tempfile::tempdir().unwrap();
        fs::write(builtin.path().join("base.toml"), BUILTIN).unwrap();
        fs::write(custom.path().join("mine.toml"), CUSTOM).unwrap();

        let set = load_definitions(Some(builtin.path()), Some(custom.path())).unwrap();
        assert_eq!(set.buffs.len(), 2);
        assert_eq!(set.buff("double_slots").unwrap().name, "Triple Slots");
        assert_eq!(set.enabled_buffs().count(), 1);

        let card = set.card("lucky_card").unwrap();
        assert_eq!(set.missing_buffs(card).collect::<Vec<_>>(), vec!["no_such_buff"]);
    }

    #[test]
    fn test_bad_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a_good.toml"), BUILTIN).unwrap();
        fs::write(dir.path().join("b_bad.toml"), "[[buff]]\nid = ").unwrap();
        fs::write(dir.path().join("notes.txt"), "not toml").unwrap();

        let set = load_definitions(Some(dir.path()), None).unwrap();
        assert_eq!(set.buffs.len(), 2);
        assert_eq!(set.cards.len(), 1);
    }

    #[test]
    fn test_missing_dirs_are_empty() {
        let set = load_definitions(Some(Path::new("/nonexistent/stackbuff")), None).unwrap();
        assert!(set.buffs.is_empty());
    }

    #[test]
    fn test_load_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[[buff]]\nname = 3").unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let config: DefinitionConfig = toml::from_str(BUILTIN).unwrap();

        save_file(&path, &config).unwrap();
        assert_eq!(load_file(&path).unwrap(), config);
    }
}
