use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const APP_NAME: &str = "stackbuff";

/// User settings persisted by `confy` under the platform config dir.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Definitions directory used when `--definitions` is not given
    pub definitions_dir: Option<PathBuf>,
    pub round_seconds: f32,
    pub per_slot_value: i32,
    pub multiplier_increase: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            definitions_dir: None,
            round_seconds: 60.0,
            per_slot_value: 10,
            multiplier_increase: 1,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        confy::load(APP_NAME, None).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load settings, using defaults");
            Self::default()
        })
    }

    pub fn store(&self) -> Result<(), String> {
        confy::store(APP_NAME, None, self).map_err(|e| e.to_string())
    }

    pub fn path() -> Option<PathBuf> {
        confy::get_configuration_file_path(APP_NAME, None).ok()
    }
}
