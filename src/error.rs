//! Error types shared by credential resolution, client setup and the walk

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout vaultfind.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a search.
///
/// The configuration variants are raised before any request is sent. `Request`
/// is the only error a walk produces, and it is returned unchanged from
/// whatever depth it happened at.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Vault address is not provided (set VAULT_ADDR)")]
    MissingAddress,

    #[error("invalid Vault address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Vault token is not provided (set VAULT_TOKEN or write {})", .path.display())]
    MissingToken { path: PathBuf },

    #[error("failed to read Vault token from {}: {}", .path.display(), .source)]
    TokenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to determine home directory")]
    HomeDirectory,

    #[error("invalid mount point '{0}'")]
    InvalidMount(String),

    #[error("failed to create Vault client: {0}")]
    Client(String),

    #[error("failed to list {endpoint}: {message}")]
    Request { endpoint: String, message: String },
}

impl Error {
    /// Create a request error for a listing endpoint.
    pub fn request(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Request {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// True for errors raised while resolving configuration, before any traversal.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Request { .. })
    }
}
