//! Authored content types shared between the engine and its tooling.
//!
//! Everything here is plain serde data: buff and card definitions as they
//! appear in TOML content files, plus display helpers.

mod definition;
pub mod formatting;

pub use definition::{
    ActiveEffectSpec, BuffDefinition, BuffEffectSpec, CardDefinition, DefinitionConfig,
    DurationSpec,
};
