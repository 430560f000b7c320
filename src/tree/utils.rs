//! Shared utility functions for tree walking

use glob::Pattern;

/// Path separator used by Vault key listings.
pub const SEPARATOR: char = '/';

/// A path ending in the separator is a directory node; anything else is a secret.
pub fn is_directory(path: &str) -> bool {
    path.ends_with(SEPARATOR)
}

/// Relative path of a child key under `parent`.
pub fn child_path(parent: &str, child: &str) -> String {
    format!("{}{}", parent, child)
}

/// Name of a listed key without its trailing separator.
pub fn segment_name(key: &str) -> &str {
    key.strip_suffix(SEPARATOR).unwrap_or(key)
}

/// Number of directory levels above a secret (`a` = 0, `b/d/e` = 2).
pub fn depth_of(path: &str) -> usize {
    path.matches(SEPARATOR).count()
}

/// Check if a listed key should be skipped based on ignore patterns.
pub fn should_ignore_key(key: &str, ignore_patterns: &[String]) -> bool {
    let name = segment_name(key);
    ignore_patterns
        .iter()
        .any(|pattern| name == pattern || glob_match(pattern, name))
}

/// Match a glob pattern against a name.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    Pattern::new(pattern)
        .map(|p| p.matches(name))
        .unwrap_or(false)
}
