//! TreeWalker - flattens a remote key tree into the list of secret paths

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::Result;
use crate::lister::SecretLister;

use super::config::WalkerConfig;
use super::utils::{child_path, is_directory, should_ignore_key};

/// Stack size for worker threads. Every level of nesting adds a
/// `walk_dir`/`par_iter` frame, and rayon's 2 MiB default overflows on deep trees.
const WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Tree walker that lists a directory, then descends into every child that
/// ends in the separator. One listing request is made per directory; secrets
/// are never listed.
///
/// The first listing failure aborts the whole walk and is returned as-is.
/// A path that does not exist contributes no secrets.
pub struct TreeWalker<L> {
    lister: L,
    config: WalkerConfig,
}

impl<L: SecretLister> TreeWalker<L> {
    pub fn new(lister: L, config: WalkerConfig) -> Self {
        Self { lister, config }
    }

    pub fn lister(&self) -> &L {
        &self.lister
    }

    /// Walk from `path` (relative to the mount, empty for the mount root) and
    /// return every secret path beneath it, relative to the mount.
    pub fn walk(&self, path: &str) -> Result<Vec<String>> {
        let workers = self.config.parallel_workers;
        if workers == 1 {
            return self.walk_dir(path, false);
        }

        // num_threads(0) lets rayon pick the thread count
        match rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .stack_size(WORKER_STACK_SIZE)
            .build()
        {
            Ok(pool) => pool.install(|| self.walk_dir(path, true)),
            Err(e) => {
                warn!(error = %e, workers, "failed to build worker pool, using global pool");
                self.walk_dir(path, true)
            }
        }
    }

    fn walk_dir(&self, path: &str, parallel: bool) -> Result<Vec<String>> {
        let mount = self.lister.mount();
        debug!(path = %format!("{}/{}", mount, path), "listing secrets");

        let Some(mut keys) = self.lister.list(path)? else {
            debug!(path = %format!("{}/{}", mount, path), "no secrets found");
            return Ok(Vec::new());
        };

        if self.config.sort_children {
            keys.sort();
        }
        keys.retain(|key| {
            if key.is_empty() {
                warn!(path = %format!("{}/{}", mount, path), "skipping empty key in listing");
                return false;
            }
            if should_ignore_key(key, &self.config.ignore_patterns) {
                debug!(item = %key, "ignoring");
                return false;
            }
            true
        });

        let found: Vec<String> = if parallel {
            // Ordered collect keeps the sequential discovery order
            keys.par_iter()
                .map(|key| self.visit(path, key, parallel))
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .flatten()
                .collect()
        } else {
            let mut found = Vec::new();
            for key in &keys {
                found.extend(self.visit(path, key, parallel)?);
            }
            found
        };

        debug!(number = found.len(), path = %format!("{}/{}", mount, path), "found secrets");
        Ok(found)
    }

    /// Classify a listed key once: directories are walked, secrets are returned.
    fn visit(&self, parent: &str, key: &str, parallel: bool) -> Result<Vec<String>> {
        let item = child_path(parent, key);
        if is_directory(&item) {
            debug!(item = %key, "found a directory");
            self.walk_dir(&item, parallel)
        } else {
            debug!(item = %key, "found a secret");
            Ok(vec![item])
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::error::Error;
    use crate::test_utils::MemoryVault;

    fn example_vault() -> MemoryVault {
        MemoryVault::from_paths("secret", &["a", "b/c", "b/d/e"])
    }

    fn sequential() -> WalkerConfig {
        WalkerConfig::default()
    }

    fn parallel(workers: usize) -> WalkerConfig {
        WalkerConfig {
            parallel_workers: workers,
            ..Default::default()
        }
    }

    #[test]
    fn test_walk_example_tree() {
        let walker = TreeWalker::new(example_vault(), sequential());
        let found = walker.walk("").unwrap();
        assert_eq!(found, vec!["a", "b/c", "b/d/e"]);
    }

    #[test]
    fn test_walk_empty_mount_returns_nothing() {
        let walker = TreeWalker::new(MemoryVault::new("secret"), sequential());
        assert!(walker.walk("").unwrap().is_empty());
    }

    #[test]
    fn test_walk_absent_path_is_not_an_error() {
        let walker = TreeWalker::new(example_vault(), sequential());
        // A secret queried as a directory has no children
        assert!(walker.walk("b/d/e/").unwrap().is_empty());
        assert!(walker.walk("missing/").unwrap().is_empty());
    }

    #[test]
    fn test_walk_empty_directory_contributes_nothing() {
        let vault = example_vault();
        vault.add_empty_dir("empty/");
        let walker = TreeWalker::new(vault, sequential());
        assert_eq!(walker.walk("").unwrap(), vec!["a", "b/c", "b/d/e"]);
    }

    #[test]
    fn test_walk_subtree() {
        let walker = TreeWalker::new(example_vault(), sequential());
        assert_eq!(walker.walk("b/").unwrap(), vec!["b/c", "b/d/e"]);
        assert_eq!(walker.walk("b/d/").unwrap(), vec!["b/d/e"]);
    }

    #[test]
    fn test_walk_lists_each_directory_once_and_never_a_secret() {
        let walker = TreeWalker::new(example_vault(), sequential());
        walker.walk("").unwrap();
        let mut calls = walker.lister().calls();
        calls.sort();
        assert_eq!(calls, vec!["", "b/", "b/d/"]);
    }

    #[test]
    fn test_walk_never_returns_directories() {
        let vault = MemoryVault::from_paths(
            "secret",
            &["x/y/z/deep", "x/y/shallow", "x/top", "root", "q/r/s/t/u"],
        );
        let walker = TreeWalker::new(vault, sequential());
        let found = walker.walk("").unwrap();
        assert_eq!(found.len(), 5);
        assert!(found.iter().all(|p| !is_directory(p)));
    }

    #[test]
    fn test_walk_sorts_unordered_listings() {
        let vault = example_vault().reversed();
        let walker = TreeWalker::new(vault, sequential());
        assert_eq!(walker.walk("").unwrap(), vec!["a", "b/c", "b/d/e"]);
    }

    #[test]
    fn test_walk_unsorted_keeps_listing_order() {
        let vault = example_vault().reversed();
        let config = WalkerConfig {
            sort_children: false,
            ..Default::default()
        };
        let walker = TreeWalker::new(vault, config);
        assert_eq!(walker.walk("").unwrap(), vec!["b/d/e", "b/c", "a"]);
    }

    #[test]
    fn test_walk_is_idempotent() {
        let walker = TreeWalker::new(example_vault().reversed(), sequential());
        let first: HashSet<_> = walker.walk("").unwrap().into_iter().collect();
        let second: HashSet<_> = walker.walk("").unwrap().into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_walk_error_at_depth_aborts_everything() {
        let vault = example_vault();
        vault.fail_at("b/d/", "permission denied");
        let walker = TreeWalker::new(vault, sequential());
        match walker.walk("") {
            Err(Error::Request { endpoint, message }) => {
                assert_eq!(endpoint, "secret/metadata/b/d/");
                assert_eq!(message, "permission denied");
            }
            other => panic!("expected request error, got {:?}", other),
        }
    }

    #[test]
    fn test_walk_error_at_root() {
        let vault = example_vault();
        vault.fail_at("", "connection refused");
        let walker = TreeWalker::new(vault, sequential());
        assert!(matches!(walker.walk(""), Err(Error::Request { .. })));
    }

    #[test]
    fn test_walk_ignore_patterns_prune_subtrees() {
        let config = WalkerConfig {
            ignore_patterns: vec!["d".to_string()],
            ..Default::default()
        };
        let walker = TreeWalker::new(example_vault(), config);
        assert_eq!(walker.walk("").unwrap(), vec!["a", "b/c"]);
        assert!(!walker.lister().calls().contains(&"b/d/".to_string()));
    }

    #[test]
    fn test_walk_ignore_glob_on_secrets() {
        let vault = MemoryVault::from_paths("secret", &["app/db-primary", "app/db-replica", "app/cache"]);
        let config = WalkerConfig {
            ignore_patterns: vec!["db-*".to_string()],
            ..Default::default()
        };
        let walker = TreeWalker::new(vault, config);
        assert_eq!(walker.walk("").unwrap(), vec!["app/cache"]);
    }

    #[test]
    fn test_walk_skips_empty_keys() {
        let vault = example_vault();
        vault.add_raw_key("", "");
        let walker = TreeWalker::new(vault, sequential());
        assert_eq!(walker.walk("").unwrap(), vec!["a", "b/c", "b/d/e"]);
    }

    #[test]
    fn test_parallel_walk_matches_sequential_order() {
        let paths: Vec<String> = (0..20)
            .flat_map(|i| (0..5).map(move |j| format!("team{:02}/svc{}/key", i, j)))
            .collect();
        let refs: Vec<&str> = paths.iter().map(String::as_str).collect();

        let expected = TreeWalker::new(MemoryVault::from_paths("secret", &refs), sequential())
            .walk("")
            .unwrap();
        for workers in [0, 4] {
            let walker = TreeWalker::new(
                MemoryVault::from_paths("secret", &refs).reversed(),
                parallel(workers),
            );
            assert_eq!(walker.walk("").unwrap(), expected);
        }
        assert_eq!(expected.len(), 100);
    }

    #[test]
    fn test_parallel_walk_propagates_errors() {
        let vault = example_vault();
        vault.fail_at("b/", "permission denied");
        let walker = TreeWalker::new(vault, parallel(4));
        assert!(matches!(walker.walk(""), Err(Error::Request { .. })));
    }

    fn deep_path(depth: usize) -> String {
        (0..depth).map(|i| format!("l{}/", i)).collect::<String>() + "leaf"
    }

    #[test]
    fn test_deep_tree() {
        let deep = deep_path(200);
        let vault = MemoryVault::from_paths("secret", &[deep.as_str()]);
        let walker = TreeWalker::new(vault, sequential());
        assert_eq!(walker.walk("").unwrap(), vec![deep]);
    }

    #[test]
    fn test_deep_tree_parallel() {
        let deep = deep_path(1000);
        for workers in [0, 4] {
            let vault = MemoryVault::from_paths("secret", &[deep.as_str(), "l0/side"]).untracked();
            let walker = TreeWalker::new(vault, parallel(workers));
            assert_eq!(walker.walk("").unwrap(), vec![deep.clone(), "l0/side".to_string()]);
        }
    }
}
