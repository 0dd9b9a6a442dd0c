//! Path parsing
//!
//! This module splits relative path strings into segments.

use std::fmt;

/// An ordered sequence of path segments
///
/// Produced by splitting on `/`. Trailing empty segments are discarded, so
/// `"a/"` and `"a"` are the same path and `""` has no segments at all.
/// Leading and interior empty segments (`"/a"`, `"a//b"`) are kept; they
/// never match a child during resolution.
///
/// # Examples
///
/// ```
/// use fs_view::PathSpec;
///
/// let path = PathSpec::parse("Data/./Textures/ground.raw");
/// assert_eq!(path.segments(), ["Data", ".", "Textures", "ground.raw"]);
/// assert_eq!(path.to_string(), "Data/Textures/ground.raw");
///
/// assert!(PathSpec::parse("").is_empty());
/// assert_eq!(PathSpec::parse("a//b").segments(), ["a", "", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSpec {
    segments: Vec<String>,
}

impl PathSpec {
    /// The current-directory segment
    pub const CURRENT: &'static str = ".";

    /// Splits a path into segments
    pub fn parse(path: &str) -> Self {
        let mut segments: Vec<String> = path.split('/').map(str::to_string).collect();
        while segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }
        Self { segments }
    }

    /// The path with no segments, which denotes the root
    pub fn root() -> Self {
        Self::default()
    }

    /// All segments, no-op segments included
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether the path has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether every segment is a no-op, so the path denotes the root
    pub fn is_root(&self) -> bool {
        self.segments.iter().all(|s| Self::is_noop(s))
    }

    /// Whether a segment is skipped during resolution
    pub fn is_noop(segment: &str) -> bool {
        segment == Self::CURRENT
    }

    /// Segments that take part in resolution, with their original index
    pub fn lookups(&self) -> impl Iterator<Item = (usize, &str)> {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, s)| !Self::is_noop(s))
            .map(|(i, s)| (i, s.as_str()))
    }
}

impl From<&str> for PathSpec {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

/// Displays the path with no-op segments removed
impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, segment) in self.lookups() {
            if !first {
                f.write_str("/")?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}
