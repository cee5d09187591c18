//! Application error types and user-facing error formatting.
//!
//! Absence is never an error here: a missing directory, module file or class
//! simply means a strategy has no candidates. What does surface is a source
//! file that exists but cannot be read or parsed, and a missing or unusable
//! project root.
//!
//! [`CompleteError`] carries contextual hints and exit codes so that
//! `main()` can present human-readable diagnostics on stderr without ever
//! exposing raw panics or debug formatting.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

/// Process exit codes.
///
/// * `0` - success (including "no completions")
/// * `1` - runtime error (unreadable or unparsable source, I/O failure)
/// * `2` - usage / configuration error (no usable project root)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

// ---------------------------------------------------------------------------
// Unified application error
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum CompleteError {
    /// No layer of configuration supplied a project root.
    #[error("no project root configured")]
    MissingRoot,

    /// The configured project root is not a directory.
    #[error("project root is not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    /// A module file exists but is not valid source.
    #[error("failed to parse {}: syntax error at line {line}, column {column}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    /// A file or directory exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bundled grammar is incompatible with the linked tree-sitter runtime.
    #[error("failed to load grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CompleteError {
    /// Return the appropriate process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CompleteError::MissingRoot | CompleteError::InvalidRoot(_) => EXIT_USAGE,
            _ => EXIT_ERROR,
        }
    }

    /// Return an optional human-readable hint that may help the user fix
    /// the problem.  Returns `None` when no specific guidance applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CompleteError::MissingRoot => Some(
                "pass --root, set DOTCOMPLETE_ROOT, or set `root` under [project] in .dotcomplete/config.toml",
            ),
            CompleteError::InvalidRoot(_) => {
                Some("the project root must be an existing directory")
            }
            CompleteError::Parse { .. } => {
                Some("fix the syntax error; completion only reads files that parse")
            }
            CompleteError::Read { source, .. }
                if source.kind() == std::io::ErrorKind::PermissionDenied =>
            {
                Some("check file permissions")
            }
            CompleteError::Read { source, .. }
                if source.kind() == std::io::ErrorKind::InvalidData =>
            {
                Some("source files must be UTF-8 encoded")
            }
            CompleteError::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                Some("check file permissions")
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
