use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrayfigError {
    #[error("Unsupported value type: {kind} cannot be stored as a setting")]
    UnsupportedValueType { kind: String },

    #[error("Cannot merge top-level value '{key}': bulk input must map group names to groups")]
    MixedMergeInput { key: String },

    #[error("Invalid write mode '{value}': expected an octal permission value such as 0644")]
    InvalidWriteMode { value: String },

    #[error("No default path configured; call .location() or .default_path() on the builder")]
    NoDefaultPath,

    #[error("App name is required for the platform location; call .app_name() on the builder")]
    AppNameRequired,

    #[error("Failed to write {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}
