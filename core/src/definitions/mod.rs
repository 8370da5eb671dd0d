//! Buff and card definitions loaded from TOML content files.

mod config;

pub use config::{
    ConfigError, DefinitionSet, default_builtin_dir, default_custom_dir, load_definitions,
    load_file, save_file,
};
