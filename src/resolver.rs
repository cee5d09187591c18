//! Dotted-path resolution.
//!
//! A base path is ambiguous until checked against the disk: `pkg.mod` may be a
//! sub-package, `pkg.mod.Foo` a class in `pkg/mod.py`, and so on. The
//! [`Resolver`] tries each interpretation in a fixed order, cheapest check
//! first, and stops at the first one that yields any candidate. Results from
//! different levels are never merged.

use std::path::{Path, PathBuf};

use crate::dotted::DottedPath;
use crate::errors::CompleteError;
use crate::introspect::{Introspector, SOURCE_EXTENSION};
use crate::prober;
use crate::types::{Completion, ResolutionLevel};

/// What a strategy may consult: the project root and the introspector.
pub struct Lookup<'a> {
    pub root: &'a Path,
    pub introspector: &'a Introspector,
}

/// One interpretation of what a base path denotes.
pub trait Strategy {
    /// The level reported when this strategy produces candidates.
    fn level(&self) -> ResolutionLevel;

    /// Candidate names for `partial` under `base`. Absence of whatever the
    /// base should name is an empty list, not an error.
    fn candidates(
        &self,
        lookup: &Lookup<'_>,
        base: &[String],
        partial: &str,
    ) -> Result<Vec<String>, CompleteError>;
}

/// `base` is a directory under the root.
pub struct FilesystemStrategy;

impl Strategy for FilesystemStrategy {
    fn level(&self) -> ResolutionLevel {
        ResolutionLevel::Filesystem
    }

    fn candidates(
        &self,
        lookup: &Lookup<'_>,
        base: &[String],
        partial: &str,
    ) -> Result<Vec<String>, CompleteError> {
        prober::list_matches(lookup.root, base, partial)
    }
}

/// `base` names a module file; complete its top-level classes.
pub struct ClassStrategy;

impl Strategy for ClassStrategy {
    fn level(&self) -> ResolutionLevel {
        ResolutionLevel::Class
    }

    fn candidates(
        &self,
        lookup: &Lookup<'_>,
        base: &[String],
        partial: &str,
    ) -> Result<Vec<String>, CompleteError> {
        let Some(file) = module_file(lookup.root, base) else {
            return Ok(Vec::new());
        };
        lookup.introspector.find_class_names(&file, partial)
    }
}

/// `base` names a class inside a module file; complete its methods.
pub struct MethodStrategy;

impl Strategy for MethodStrategy {
    fn level(&self) -> ResolutionLevel {
        ResolutionLevel::Method
    }

    fn candidates(
        &self,
        lookup: &Lookup<'_>,
        base: &[String],
        partial: &str,
    ) -> Result<Vec<String>, CompleteError> {
        let Some((class_name, module)) = base.split_last() else {
            return Ok(Vec::new());
        };
        let Some(file) = module_file(lookup.root, module) else {
            return Ok(Vec::new());
        };
        lookup
            .introspector
            .find_method_names(&file, class_name, partial)
    }
}

/// Locate the module file named by `module`: the last segment plus the source
/// extension, inside the directory formed by the preceding segments.
///
/// Returns `None` for an empty path or when no such regular file exists.
pub fn module_file(root: &Path, module: &[String]) -> Option<PathBuf> {
    let (stem, dirs) = module.split_last()?;
    let file = prober::base_dir(root, dirs).join(format!("{stem}.{SOURCE_EXTENSION}"));
    if file.is_file() {
        Some(file)
    } else {
        tracing::trace!(file = %file.display(), "no module file");
        None
    }
}

/// The strategy chain in its fixed order.
pub fn default_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(FilesystemStrategy),
        Box::new(ClassStrategy),
        Box::new(MethodStrategy),
    ]
}

/// Completes dotted paths relative to a project root.
pub struct Resolver {
    root: PathBuf,
    introspector: Introspector,
    strategies: Vec<Box<dyn Strategy>>,
}

impl Resolver {
    /// Create a resolver for `root` with the default strategy chain.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::with_strategies(root, default_strategies())
    }

    /// Create a resolver that tries `strategies` in the given order.
    pub fn with_strategies<P: AsRef<Path>>(root: P, strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            introspector: Introspector::new(),
            strategies,
        }
    }

    /// Replace the introspector (e.g. to include `async def` members).
    pub fn introspector(mut self, introspector: Introspector) -> Self {
        self.introspector = introspector;
        self
    }

    /// Run the strategy chain for `path` and return the first non-empty
    /// candidate list with its level, as bare names.
    pub fn resolve(
        &self,
        path: &DottedPath,
    ) -> Result<Option<(ResolutionLevel, Vec<String>)>, CompleteError> {
        if !path.base_is_resolvable() {
            tracing::debug!(%path, "base path cannot name an entry under the root");
            return Ok(None);
        }

        let lookup = Lookup {
            root: &self.root,
            introspector: &self.introspector,
        };
        for strategy in &self.strategies {
            let level = strategy.level();
            let names = strategy.candidates(&lookup, path.base(), path.partial())?;
            tracing::debug!(%level, count = names.len(), "strategy tried");
            if !names.is_empty() {
                return Ok(Some((level, names)));
            }
        }
        Ok(None)
    }

    /// Complete `cur` into sorted, de-duplicated full dotted strings.
    pub fn complete(&self, cur: &str) -> Result<Completion, CompleteError> {
        let path = DottedPath::parse(cur);
        let Some((level, names)) = self.resolve(&path)? else {
            return Ok(Completion::default());
        };

        let mut completions: Vec<String> = names.iter().map(|name| path.join(name)).collect();
        completions.sort();
        completions.dedup();
        tracing::debug!(%level, count = completions.len(), "resolved");

        Ok(Completion {
            level: Some(level),
            completions,
        })
    }
}
