//! Test utilities: an in-memory Vault listing backend and a temporary home directory.
//!
//! This module is only compiled for tests and benchmarks.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::lister::{Listing, SecretLister, listing_endpoint};

/// An in-memory KV v2 key tree.
///
/// Listings are returned in insertion order, like a remote service that makes
/// no ordering promise. Every `list` call is recorded so tests can count
/// round-trips.
pub struct MemoryVault {
    mount: String,
    dirs: Mutex<HashMap<String, Vec<String>>>,
    failures: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<String>>,
    record_calls: bool,
}

impl MemoryVault {
    /// Create an empty mount. Listing its root returns nothing found.
    pub fn new(mount: &str) -> Self {
        Self {
            mount: mount.to_string(),
            dirs: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            record_calls: true,
        }
    }

    /// Create a mount holding the given secret paths.
    pub fn from_paths(mount: &str, paths: &[&str]) -> Self {
        let vault = Self::new(mount);
        for path in paths {
            vault.add_secret(path);
        }
        vault
    }

    /// Add a secret, creating every parent directory listing on the way.
    pub fn add_secret(&self, path: &str) {
        let mut dirs = self.dirs.lock().expect("vault lock poisoned");
        let mut parent = String::new();
        let segments: Vec<&str> = path.split('/').collect();
        for (i, segment) in segments.iter().enumerate() {
            let key = if i + 1 == segments.len() {
                segment.to_string()
            } else {
                format!("{}/", segment)
            };
            let listing = dirs.entry(parent.clone()).or_default();
            if !listing.contains(&key) {
                listing.push(key.clone());
            }
            parent.push_str(&key);
        }
    }

    /// Add a directory that exists but lists no children.
    pub fn add_empty_dir(&self, dir: &str) {
        let mut dirs = self.dirs.lock().expect("vault lock poisoned");
        let root = dirs.entry(String::new()).or_default();
        if !root.iter().any(|k| k == dir) {
            root.push(dir.to_string());
        }
        dirs.entry(dir.to_string()).or_default();
    }

    /// Append a key to a directory listing verbatim.
    pub fn add_raw_key(&self, dir: &str, key: &str) {
        let mut dirs = self.dirs.lock().expect("vault lock poisoned");
        dirs.entry(dir.to_string()).or_default().push(key.to_string());
    }

    /// Make listing `dir` fail with `message`.
    pub fn fail_at(&self, dir: &str, message: &str) {
        self.failures
            .lock()
            .expect("vault lock poisoned")
            .insert(dir.to_string(), message.to_string());
    }

    /// Reverse every listing.
    pub fn reversed(self) -> Self {
        for listing in self.dirs.lock().expect("vault lock poisoned").values_mut() {
            listing.reverse();
        }
        self
    }

    /// Stop recording calls, for long-running benchmarks.
    pub fn untracked(mut self) -> Self {
        self.record_calls = false;
        self
    }

    /// Paths listed so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("vault lock poisoned").clone()
    }
}

impl SecretLister for MemoryVault {
    fn list(&self, path: &str) -> Result<Listing> {
        if self.record_calls {
            self.calls
                .lock()
                .expect("vault lock poisoned")
                .push(path.to_string());
        }

        if let Some(message) = self.failures.lock().expect("vault lock poisoned").get(path) {
            return Err(Error::request(listing_endpoint(&self.mount, path), message));
        }
        Ok(self.dirs.lock().expect("vault lock poisoned").get(path).cloned())
    }

    fn mount(&self) -> &str {
        &self.mount
    }
}

/// A temporary home directory for token file resolution.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Create a home directory containing a `.vault-token` file.
    pub fn with_token(contents: &str) -> Self {
        let home = Self::new();
        home.write_token(contents);
        home
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_token(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join(".vault-token");
        fs::write(&path, contents).expect("Failed to write token file");
        path
    }
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}
