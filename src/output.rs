//! Output formatting for completions and stderr diagnostics.
//!
//! Completions go to stdout in one of three shapes:
//!
//! * **plain** - one line, space separated (what shell `compgen -W` wants)
//! * **lines** - one completion per line
//! * **json** - `{"level": ..., "completions": [...]}`
//!
//! Errors and hints go to stderr so stdout stays parseable.

use std::io::{self, Write};

use crate::types::{Completion, OutputFormat};

/// Write `completion` to `writer` in the requested format.
pub fn write_completion<W: Write>(
    writer: &mut W,
    completion: &Completion,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => writeln!(writer, "{}", completion.completions.join(" ")),
        OutputFormat::Lines => {
            for c in &completion.completions {
                writeln!(writer, "{c}")?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, completion)?;
            writeln!(writer)
        }
    }
}

/// Print `completion` to stdout. A closed pipe is not an error.
pub fn print_completion(completion: &Completion, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match write_completion(&mut out, completion, format).and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Stderr helpers
// ---------------------------------------------------------------------------

/// Print a hint message to stderr.
pub fn print_hint(msg: &str) {
    eprintln!("hint: {msg}");
}

/// Print an error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("error: {msg}");
}

/// Format a [`CompleteError`](crate::errors::CompleteError) to stderr with
/// structured `error:` / `hint:` lines and return the process exit code.
pub fn format_error(err: &crate::errors::CompleteError) -> i32 {
    print_error(&format!("{err}"));
    if let Some(hint) = err.hint() {
        print_hint(hint);
    }
    err.exit_code()
}
