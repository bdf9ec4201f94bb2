//! Error types.

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading an [`EngineConfig`](crate::EngineConfig) or a template catalog.
///
/// Detection, decoration, folding and completion never fail; only loading external input does.
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    /// YAML parsing failed.
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    /// The configuration parsed but holds an unusable value.
    Invalid(String),
}
