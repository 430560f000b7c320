//! JSON output formatting

use std::io;

use serde::Serialize;

use crate::tree::SearchFilter;

/// Search result as printed by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    /// Mount with trailing separator (e.g. `secret/`)
    pub mount: String,
    /// Search term as given, `null` when listing everything
    pub filter: Option<String>,
    /// Mount-prefixed secret paths in walk order
    pub secrets: Vec<String>,
}

impl SearchReport {
    pub fn new(mount: &str, search: &str, paths: &[String], filter: &SearchFilter) -> Self {
        let mount = format!("{}/", mount);
        let secrets = filter
            .apply(paths)
            .into_iter()
            .map(|p| format!("{}{}", mount, p))
            .collect();
        Self {
            mount,
            filter: if search.is_empty() {
                None
            } else {
                Some(search.to_string())
            },
            secrets,
        }
    }
}

/// Print a search report as pretty-printed JSON to stdout.
pub fn print_json(report: &SearchReport) -> io::Result<()> {
    write_json(&mut io::stdout().lock(), report)
}

/// Write a search report as pretty-printed JSON.
pub fn write_json<W: io::Write>(out: &mut W, report: &SearchReport) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
    writeln!(out, "{}", json)
}
