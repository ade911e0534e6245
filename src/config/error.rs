//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed folio.toml")]
    Toml(#[from] toml::de::Error),

    /// A field parsed but holds an unusable value.
    #[error("invalid [{field}]: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    pub(super) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}
