//! Errors raised while configuring and assembling a policy document.

use std::path::PathBuf;

use thiserror::Error;

use ism_core::IsmError;
use ism_state::ChainError;

#[derive(Error, Debug)]
pub enum PolicyError {
    /// Invalid input value, e.g. a malformed stage age.
    #[error(transparent)]
    Ism(#[from] IsmError),

    /// The built chain violates a lifecycle invariant.
    #[error("invalid lifecycle chain: {0}")]
    Chain(#[from] ChainError),

    /// The configuration file could not be read.
    #[error("failed to read config file {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`crate::PolicyOverrides`].
    #[error("failed to parse config file {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON serialization of the document failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PolicyError {
    /// Whether this error was caused by a malformed age argument.
    pub fn is_invalid_age(&self) -> bool {
        matches!(self, Self::Ism(e) if e.is_invalid_age())
    }
}
