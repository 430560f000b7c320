//! Secret tree walking logic
//!
//! Vault exposes a KV v2 mount as a tree that can only be discovered one
//! listing at a time. Keys ending in `/` are directories, everything else is a
//! secret. `TreeWalker` turns that tree into a flat list of secret paths and
//! `SearchFilter` narrows the list down for display.

mod config;
mod filter;
mod utils;
mod walker;

// Re-export public types
pub use config::WalkerConfig;
pub use filter::SearchFilter;
pub use utils::{SEPARATOR, child_path, depth_of, glob_match, is_directory, segment_name};
pub use walker::TreeWalker;
