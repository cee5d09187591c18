//! Shared types and data structures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the base of a dotted path turned out to denote.
///
/// Never stored; recomputed by the resolver on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionLevel {
    /// Base is a directory; candidates are directory and file names.
    Filesystem,
    /// Base names a module file; candidates are its top-level classes.
    Class,
    /// Base names a class in a module; candidates are its methods.
    Method,
}

impl fmt::Display for ResolutionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResolutionLevel::Filesystem => "filesystem",
            ResolutionLevel::Class => "class",
            ResolutionLevel::Method => "method",
        };
        write!(f, "{s}")
    }
}

/// The outcome of completing one dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Completion {
    /// The level that produced the candidates, or `None` when nothing matched.
    pub level: Option<ResolutionLevel>,
    /// Full dotted strings, sorted and de-duplicated.
    pub completions: Vec<String>,
}

impl Completion {
    pub fn is_empty(&self) -> bool {
        self.completions.is_empty()
    }
}

/// How completions are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A single space-separated line.
    #[default]
    Plain,
    /// One completion per line.
    Lines,
    /// A JSON object with the level and the completions.
    Json,
}
