//! Vault address and token resolution
//!
//! The address comes from `VAULT_ADDR`. The token comes from `VAULT_TOKEN`, or
//! failing that from `~/.vault-token`, the file the `vault login` command writes.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

pub const ADDRESS_VAR: &str = "VAULT_ADDR";
pub const TOKEN_VAR: &str = "VAULT_TOKEN";
pub const TOKEN_FILE_NAME: &str = ".vault-token";

/// Resolved connection settings for a Vault server.
#[derive(Clone)]
pub struct Credentials {
    pub address: String,
    pub token: String,
}

// Keep the token out of logs and panic messages
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("address", &self.address)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Resolve credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_sources(
            non_empty_var(ADDRESS_VAR),
            non_empty_var(TOKEN_VAR),
            home_dir(),
        )
    }

    /// Resolve credentials from explicit sources.
    ///
    /// A missing address is reported before the token is looked at. The token
    /// file is only read when `token` is `None`, and `home` is only required in
    /// that case.
    pub fn from_sources(
        address: Option<String>,
        token: Option<String>,
        home: Option<PathBuf>,
    ) -> Result<Self> {
        let address = address.ok_or(Error::MissingAddress)?;
        validate_address(&address)?;

        let token = match token {
            Some(token) => {
                debug!("Using token from {}", TOKEN_VAR);
                token
            }
            None => {
                let home = home.ok_or(Error::HomeDirectory)?;
                read_token_file(&home.join(TOKEN_FILE_NAME))?
            }
        };

        Ok(Self { address, token })
    }
}

/// Read a token file, trimming surrounding whitespace.
pub fn read_token_file(path: &Path) -> Result<String> {
    debug!("Reading token from file: {}", path.display());
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::MissingToken {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(Error::TokenFile {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let token = contents.trim();
    if token.is_empty() {
        return Err(Error::MissingToken {
            path: path.to_path_buf(),
        });
    }
    Ok(token.to_string())
}

fn validate_address(address: &str) -> Result<()> {
    let url = Url::parse(address).map_err(|e| Error::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::InvalidAddress {
            address: address.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
