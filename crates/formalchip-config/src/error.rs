use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported config file extension: {extension:?} (expected toml, json, yaml, or yml)")]
    UnsupportedExtension { extension: String },

    #[error("failed to read config file {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("failed to decode {format} config: {reason}")]
    DecodeFailed { format: &'static str, reason: String },

    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}
