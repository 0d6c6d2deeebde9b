//! Request path segmentation.
//!
//! Turns a raw request path into an ordered sequence of decoded,
//! non-empty segments, applying absolute-path normalization along the
//! way. Segmentation is a pure function of its input and performs no
//! I/O.

use percent_encoding::percent_decode_str;

/// An ordered sequence of decoded, non-empty path segments.
///
/// The empty sequence represents the root path `/`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSegments {
    segments: Vec<String>,
}

impl PathSegments {
    /// Parse a raw request path into segments.
    ///
    /// - Query string and fragment are cut off first.
    /// - Each segment is percent-decoded. A segment that does not decode
    ///   to UTF-8 invalidates the whole path: the result is the root,
    ///   never a partially decoded path.
    /// - Empty and `.` segments are dropped. `..` consumes the previously
    ///   accepted segment and never steps above the root.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let path = raw.find(['?', '#']).map_or(raw, |i| &raw[..i]);

        let mut segments: Vec<String> = Vec::new();
        for part in path.split('/') {
            if part.is_empty() || part == "." {
                continue;
            }
            let Ok(decoded) = percent_decode_str(part).decode_utf8() else {
                return Self::default();
            };
            let decoded = decoded.into_owned();
            if decoded.is_empty() || decoded == "." {
                continue;
            }
            if decoded == ".." {
                segments.pop();
                continue;
            }
            segments.push(decoded);
        }

        Self { segments }
    }

    /// Segment at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Join the segments from `start` onward with `/`.
    ///
    /// Returns an empty string when `start` is past the end.
    #[must_use]
    pub fn join_from(&self, start: usize) -> String {
        self.segments
            .get(start..)
            .map_or_else(String::new, |rest| rest.join("/"))
    }
}
