//! Search filtering for walked secret paths

/// Case-insensitive substring filter over relative secret paths.
///
/// An empty needle matches everything. The needle is compared against the
/// path relative to the mount, so the mount name itself never matches.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    needle: Option<String>,
}

impl SearchFilter {
    pub fn new(search: &str) -> Self {
        let needle = if search.is_empty() {
            None
        } else {
            Some(search.to_lowercase())
        };
        Self { needle }
    }

    /// The lowercased search term, if any.
    pub fn needle(&self) -> Option<&str> {
        self.needle.as_deref()
    }

    /// Check if a relative secret path should be shown.
    pub fn is_match(&self, path: &str) -> bool {
        match &self.needle {
            Some(needle) => path.to_lowercase().contains(needle.as_str()),
            None => true,
        }
    }

    /// Keep matching paths, preserving order.
    pub fn apply<'a>(&self, paths: &'a [String]) -> Vec<&'a str> {
        paths
            .iter()
            .map(String::as_str)
            .filter(|p| self.is_match(p))
            .collect()
    }

    /// Byte range of the first match in `path`, for highlighting.
    ///
    /// Returns `None` when there is no needle, no match, or lowercasing changes
    /// the byte length of `path` (so offsets would not line up).
    pub fn match_range(&self, path: &str) -> Option<(usize, usize)> {
        let needle = self.needle.as_deref()?;
        let lowered = path.to_lowercase();
        if lowered.len() != path.len() {
            return None;
        }
        let start = lowered.find(needle)?;
        let end = start + needle.len();
        if path.is_char_boundary(start) && path.is_char_boundary(end) {
            Some((start, end))
        } else {
            None
        }
    }
}
