//! HashiCorp Vault KV v2 listing backend
//!
//! Lists keys with `LIST /v1/{mount}/metadata/{path}` through `vaultrs`. The
//! async client is driven by a private tokio runtime so the walker can stay
//! synchronous; worker threads of a parallel walk share that runtime.

use tokio::runtime::Runtime;
use tracing::{debug, info};
use vaultrs::client::{VaultClient, VaultClientSettingsBuilder};
use vaultrs::error::ClientError;
use vaultrs::kv2;

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::lister::{Listing, SecretLister, listing_endpoint, normalize_mount};

/// `SecretLister` backed by a Vault server.
pub struct VaultLister {
    client: VaultClient,
    runtime: Runtime,
    mount: String,
}

impl VaultLister {
    /// Build a token-authenticated client for `mount`.
    ///
    /// No request is sent until the first `list` call.
    pub fn connect(credentials: &Credentials, mount: &str) -> Result<Self> {
        let mount =
            normalize_mount(mount).ok_or_else(|| Error::InvalidMount(mount.to_string()))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Client(format!("failed to start async runtime: {}", e)))?;

        info!("Connecting to Vault at {}", credentials.address);
        let client = {
            let _guard = runtime.enter();
            let settings = VaultClientSettingsBuilder::default()
                .address(&credentials.address)
                .token(&credentials.token)
                .build()
                .map_err(|e| Error::Client(e.to_string()))?;
            VaultClient::new(settings).map_err(|e| Error::Client(e.to_string()))?
        };

        Ok(Self {
            client,
            runtime,
            mount,
        })
    }
}

impl SecretLister for VaultLister {
    fn list(&self, path: &str) -> Result<Listing> {
        let endpoint = listing_endpoint(&self.mount, path);
        match self
            .runtime
            .block_on(kv2::list(&self.client, &self.mount, path))
        {
            Ok(keys) => Ok(Some(keys)),
            Err(e) if is_not_found(&e) => {
                debug!(endpoint = %endpoint, "nothing at path");
                Ok(None)
            }
            Err(e) => Err(Error::request(endpoint, e.to_string())),
        }
    }

    fn mount(&self) -> &str {
        &self.mount
    }
}

/// Vault answers LIST on a path with no children with a 404 and `{"errors":[]}`.
fn is_not_found(err: &ClientError) -> bool {
    matches!(err, ClientError::APIError { code: 404, .. })
}
