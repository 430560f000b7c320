//! Configuration types for the tree walker

/// Configuration for tree walking behavior.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Sort each listing before recursing so output order is reproducible.
    /// Vault does not guarantee listing order.
    pub sort_children: bool,
    /// Skip children whose name matches one of these globs.
    /// A skipped directory is never listed.
    pub ignore_patterns: Vec<String>,
    /// Number of parallel workers for sibling subtrees.
    /// 0 = auto-detect (rayon global pool)
    /// 1 = sequential (no parallelism)
    /// N = use N worker threads
    pub parallel_workers: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            sort_children: true,
            ignore_patterns: Vec::new(),
            parallel_workers: 1,
        }
    }
}
