//! vaultfind - find secret paths in a HashiCorp Vault KV v2 mount

pub mod credentials;
pub mod error;
pub mod lister;
pub mod output;
pub mod stats;
pub mod tree;
pub mod vault;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use credentials::Credentials;
pub use error::{Error, Result};
pub use lister::{Listing, SecretLister, listing_endpoint, normalize_mount};
pub use output::{ConsoleFormatter, OutputConfig, SearchReport, print_json, write_json};
pub use stats::{
    SecretStats, StatsCollector, collect_stats, print_stats, print_stats_json, write_stats,
    write_stats_json,
};
pub use tree::{SearchFilter, TreeWalker, WalkerConfig};
pub use vault::VaultLister;
