//! Configuration file parsing, defaults, and merging.
//!
//! Configuration is loaded in layers (last wins):
//! 1. Built-in defaults (no project root)
//! 2. Global config from `~/.dotcomplete/config.toml`
//! 3. Project config from the nearest `.dotcomplete/config.toml` at or above
//!    the current directory
//!
//! Each layer only overrides fields it explicitly sets; absent fields
//! are left at their previous value. A relative `root` is resolved against
//! the directory that owns the layer (the home directory for the global
//! file, the directory containing `.dotcomplete/` for the project file).
//! The `--root` flag and `DOTCOMPLETE_ROOT` are applied on top by the caller.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::types::OutputFormat;

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR: &str = ".dotcomplete";

// ---------------------------------------------------------------------------
// Public config types (fully resolved)
// ---------------------------------------------------------------------------

/// Top-level configuration, fully resolved with defaults applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub project: ProjectConfig,
    pub introspect: IntrospectConfig,
    pub output: OutputConfig,
}

/// Where dotted paths are resolved from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectConfig {
    /// Absolute directory that base paths are joined onto. Required before
    /// completing anything; there is no built-in default.
    pub root: Option<PathBuf>,
}

/// Source introspection settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntrospectConfig {
    /// Offer `async def` members as methods.
    pub include_async: bool,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

// ---------------------------------------------------------------------------
// Option-based overlay types (for partial deserialization)
// ---------------------------------------------------------------------------

/// Mirror of [`Config`] where every field is `Option`, so we can
/// deserialize a partial TOML file and overlay only the keys that are
/// present.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigOverlay {
    project: Option<ProjectOverlay>,
    introspect: Option<IntrospectOverlay>,
    output: Option<OutputOverlay>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ProjectOverlay {
    root: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct IntrospectOverlay {
    include_async: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputOverlay {
    format: Option<OutputFormat>,
}

// ---------------------------------------------------------------------------
// Merge helpers
// ---------------------------------------------------------------------------

impl Config {
    /// Apply an overlay on top of this config, replacing only the fields
    /// that are `Some` in the overlay. Relative paths are anchored at `base`.
    fn apply_overlay(&mut self, overlay: ConfigOverlay, base: &Path) {
        if let Some(p) = overlay.project
            && let Some(root) = p.root
        {
            self.project.root = Some(base.join(root));
        }
        if let Some(i) = overlay.introspect
            && let Some(v) = i.include_async
        {
            self.introspect.include_async = v;
        }
        if let Some(out) = overlay.output
            && let Some(v) = out.format
        {
            self.output.format = v;
        }
    }

    /// Override the root from the command line or environment. Relative
    /// paths are taken relative to `cwd`.
    pub fn set_root(&mut self, root: &Path, cwd: &Path) {
        self.project.root = Some(cwd.join(root));
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Return the user's home directory.
fn home_dir() -> Option<PathBuf> {
    #[allow(deprecated)]
    std::env::home_dir()
}

/// Parse a TOML string into a [`ConfigOverlay`], producing a clear error
/// message on malformed input.
fn parse_overlay(contents: &str, path: &Path) -> Result<ConfigOverlay> {
    toml::from_str(contents)
        .with_context(|| format!("failed to parse config file: {}", path.display()))
}

/// Try to read a config file and parse it as an overlay.
/// Returns `Ok(None)` if the file does not exist.
fn load_overlay(path: &Path) -> Result<Option<ConfigOverlay>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let overlay = parse_overlay(&contents, path)?;
            Ok(Some(overlay))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow::anyhow!(
            "failed to read config file {}: {}",
            path.display(),
            e
        )),
    }
}

/// Find the nearest directory at or above `start` holding
/// `.dotcomplete/config.toml`.
fn find_project_dir(start: &Path) -> Option<&Path> {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_DIR).join("config.toml").is_file())
}

impl Config {
    /// Load configuration by merging layers:
    /// defaults -> global (`~/.dotcomplete/config.toml`) -> project
    /// (nearest `.dotcomplete/config.toml` from `cwd` upwards).
    pub fn load(cwd: &Path) -> Result<Config> {
        Self::load_with_home(home_dir().as_deref(), cwd)
    }

    /// Internal: load config with an explicit home directory.
    ///
    /// This allows tests to supply a temporary directory instead of the
    /// real home without mutating environment variables.
    fn load_with_home(home: Option<&Path>, cwd: &Path) -> Result<Config> {
        let mut config = Config::default();

        // Layer 2: global config
        if let Some(home) = home {
            let global_path = home.join(CONFIG_DIR).join("config.toml");
            if let Some(overlay) = load_overlay(&global_path)? {
                config.apply_overlay(overlay, home);
            }
        }

        // Layer 3: project config. Skipped when it is the global file again.
        if let Some(project) = find_project_dir(cwd)
            && Some(project) != home
        {
            let project_path = project.join(CONFIG_DIR).join("config.toml");
            if let Some(overlay) = load_overlay(&project_path)? {
                config.apply_overlay(overlay, project);
            }
        }

        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
