//! Config schema, multi-format decoding, and validation for FormalChip.
//!
//! Decoding (TOML/JSON/YAML, by extension) and structural validation are
//! deliberately separate passes: a file that deserialises cleanly can still
//! be semantically invalid (empty `rtl_files`, a `command` backend with no
//! `command`), and keeping the passes apart lets the doctor and CLI surface
//! a precise [`ConfigError::Invalid`] instead of a raw `serde` message.

pub mod enrichment;
pub mod error;
pub mod load;
pub mod model;
pub mod validate;

pub use error::ConfigError;
pub use model::{
    ConstraintEntry, ConstraintsConfig, EngineConfig, EngineKind, FormalChipConfig, KpiConfig,
    LlmBackendKind, LlmConfig, LoopConfig, ProjectConfig, RawConfig,
};

use camino::Utf8Path;

/// Decode, validate, and path-resolve a config file in one call.
pub fn load_config(path: &Utf8Path) -> Result<FormalChipConfig, ConfigError> {
    let raw = load::decode_raw_config(path)?;
    let config = validate::resolve(raw, path)?;
    tracing::debug!(
        project = %config.project.name,
        rtl_files = config.project.rtl_files.len(),
        specs = config.specs.len(),
        "config loaded and validated"
    );
    Ok(config)
}
