//! Splitting a dotted string into a base path and the partial segment.

use std::fmt;

/// A dotted path such as `pkg.mod.FooTest.test_`.
///
/// The last segment is the partial name being completed; everything before it
/// is the base. Any string is accepted, including the empty string (which
/// yields an empty base and an empty partial).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DottedPath {
    base: Vec<String>,
    partial: String,
}

impl DottedPath {
    pub fn parse(cur: &str) -> Self {
        let mut segments: Vec<String> = cur.split('.').map(str::to_string).collect();
        // `split` always yields at least one item.
        let partial = segments.pop().unwrap_or_default();
        Self {
            base: segments,
            partial,
        }
    }

    pub fn base(&self) -> &[String] {
        &self.base
    }

    pub fn partial(&self) -> &str {
        &self.partial
    }

    /// Whether every base segment can name a filesystem entry under the root.
    ///
    /// Empty segments (from consecutive dots) and segments carrying a path
    /// separator never resolve, so a lookup cannot leave the root.
    pub fn base_is_resolvable(&self) -> bool {
        self.base.iter().all(|s| is_plain_segment(s))
    }

    /// Join the base with a candidate name into a full dotted string.
    pub fn join(&self, candidate: &str) -> String {
        if self.base.is_empty() {
            return candidate.to_string();
        }
        let mut out = self.base.join(".");
        out.push('.');
        out.push_str(candidate);
        out
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(&self.partial))
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains(['/', '\\']) && !segment.contains('\0')
}
