//! Remote listing abstraction used by the tree walker

use crate::error::Result;

/// Children of a directory node, or `None` when the node does not exist.
pub type Listing = Option<Vec<String>>;

/// A source of key listings for one KV v2 mount.
///
/// `path` is relative to the mount, has no leading separator and is either
/// empty (the mount root) or ends in `/`. Implementations return:
/// - `Ok(Some(keys))` with the immediate child names (directories end in `/`)
/// - `Ok(None)` when nothing exists at `path`
/// - `Err(Error::Request { .. })` for transport or permission failures
///
/// The walker may call `list` from several threads when run in parallel.
pub trait SecretLister: Sync {
    fn list(&self, path: &str) -> Result<Listing>;

    /// Mount name without surrounding separators (e.g. `secret`).
    fn mount(&self) -> &str;
}

/// Build the metadata listing endpoint for a path: `{mount}/metadata/{path}`.
pub fn listing_endpoint(mount: &str, path: &str) -> String {
    format!("{}/metadata/{}", mount, path)
}

/// Normalize a user-supplied mount name by stripping surrounding separators.
///
/// Returns `None` if nothing is left.
pub fn normalize_mount(mount: &str) -> Option<String> {
    let trimmed = mount.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
