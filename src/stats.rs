//! Secret statistics collection and display
//!
//! Summarizes a set of secret paths: how many secrets, how many directories
//! hold them, how deep they go and how they spread over top-level directories.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::depth_of;

/// Label for secrets stored directly at the mount root.
const ROOT_LABEL: &str = "(root)";

/// Collected statistics about the secrets of one mount.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SecretStats {
    /// Mount the paths belong to, with trailing separator
    pub mount: String,
    /// Total number of secrets
    pub secrets: usize,
    /// Number of distinct directories containing at least one secret
    pub directories: usize,
    /// Deepest directory nesting of any secret
    pub max_depth: usize,
    /// Secret counts by top-level directory
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_directory: Vec<DirectoryStats>,
}

/// Secret count for one top-level directory.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryStats {
    pub directory: String,
    pub secrets: usize,
}

/// Statistics collector that accumulates secret paths.
#[derive(Debug, Default)]
pub struct StatsCollector {
    mount: String,
    secrets: usize,
    max_depth: usize,
    directories: HashSet<String>,
    by_directory: HashMap<String, usize>,
}

impl StatsCollector {
    pub fn new(mount: &str) -> Self {
        Self {
            mount: format!("{}/", mount),
            ..Default::default()
        }
    }

    /// Record a secret path relative to the mount.
    pub fn record_secret(&mut self, path: &str) {
        self.secrets += 1;
        self.max_depth = self.max_depth.max(depth_of(path));

        for (idx, _) in path.match_indices('/') {
            self.directories.insert(path[..=idx].to_string());
        }

        let top = match path.find('/') {
            Some(idx) => &path[..=idx],
            None => ROOT_LABEL,
        };
        *self.by_directory.entry(top.to_string()).or_insert(0) += 1;
    }

    /// Finalize and return the collected statistics.
    pub fn finalize(self) -> SecretStats {
        let mut by_directory: Vec<DirectoryStats> = self
            .by_directory
            .into_iter()
            .map(|(directory, secrets)| DirectoryStats { directory, secrets })
            .collect();

        // Most populated first, ties by name
        by_directory.sort_by(|a, b| {
            b.secrets
                .cmp(&a.secrets)
                .then_with(|| a.directory.cmp(&b.directory))
        });

        SecretStats {
            mount: self.mount,
            secrets: self.secrets,
            directories: self.directories.len(),
            max_depth: self.max_depth,
            by_directory,
        }
    }
}

/// Collect statistics for a list of relative secret paths.
pub fn collect_stats<'a>(mount: &str, paths: impl IntoIterator<Item = &'a str>) -> SecretStats {
    let mut collector = StatsCollector::new(mount);
    for path in paths {
        collector.record_secret(path);
    }
    collector.finalize()
}

/// Print statistics to stdout with optional color.
pub fn print_stats(stats: &SecretStats, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);
    write_stats(&mut stdout, stats)
}

/// Write statistics to any color-capable writer.
pub fn write_stats<W: WriteColor>(out: &mut W, stats: &SecretStats) -> io::Result<()> {
    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    out.set_color(&bold)?;
    writeln!(out, "Secret Statistics: {}", stats.mount)?;
    out.reset()?;
    writeln!(out, "───────────────────")?;

    writeln!(out, "Secrets:      {} total", format_number(stats.secrets))?;
    writeln!(out, "Directories:  {}", format_number(stats.directories))?;
    writeln!(out, "Max depth:    {}", stats.max_depth)?;

    if !stats.by_directory.is_empty() {
        writeln!(out)?;
        out.set_color(&bold)?;
        writeln!(out, "By Directory:")?;
        out.reset()?;

        let mut dir_color = ColorSpec::new();
        dir_color.set_fg(Some(Color::Blue)).set_bold(true);

        for dir in &stats.by_directory {
            write!(out, "  ")?;
            out.set_color(&dir_color)?;
            write!(out, "{:<24}", dir.directory)?;
            out.reset()?;
            writeln!(out, "{:>6} secrets", format_number(dir.secrets))?;
        }
    }

    Ok(())
}

/// Format a number with thousand separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }

    result
}

/// Print statistics as JSON.
pub fn print_stats_json(stats: &SecretStats) -> io::Result<()> {
    write_stats_json(&mut io::stdout().lock(), stats)
}

/// Write statistics as pretty-printed JSON.
pub fn write_stats_json<W: io::Write>(out: &mut W, stats: &SecretStats) -> io::Result<()> {
    let json = serde_json::to_string_pretty(stats).map_err(io::Error::other)?;
    writeln!(out, "{}", json)
}
