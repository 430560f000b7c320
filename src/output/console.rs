//! Console output formatter
//!
//! Prints one mount-prefixed secret path per line, highlighting the part of
//! the path that matched the search term.

use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::SearchFilter;

use super::config::OutputConfig;

const HEADER: &str = "Found the following secrets:";

/// Console output formatter for secret lists.
pub struct ConsoleFormatter {
    config: OutputConfig,
}

impl ConsoleFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Print matching secrets to stdout.
    pub fn print(&self, mount: &str, paths: &[String], filter: &SearchFilter) -> io::Result<usize> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write(&mut stdout, mount, paths, filter)
    }

    /// Write matching secrets and return how many were written.
    pub fn write<W: WriteColor>(
        &self,
        out: &mut W,
        mount: &str,
        paths: &[String],
        filter: &SearchFilter,
    ) -> io::Result<usize> {
        if self.config.show_header {
            writeln!(out, "{}", HEADER)?;
        }

        let mut written = 0;
        for path in filter.apply(paths) {
            write!(out, "{}/", mount)?;
            match filter.match_range(path) {
                Some((start, end)) => {
                    write!(out, "{}", &path[..start])?;
                    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
                    write!(out, "{}", &path[start..end])?;
                    out.reset()?;
                    writeln!(out, "{}", &path[end..])?;
                }
                None => writeln!(out, "{}", path)?,
            }
            written += 1;
        }
        Ok(written)
    }
}
