use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::Config;
use crate::errors::CompleteError;
use crate::introspect::Introspector;
use crate::output;
use crate::resolver::Resolver;

/// Load configuration, complete the requested path and print the result.
pub fn dispatch(cli: Cli) -> Result<(), CompleteError> {
    let cwd = std::env::current_dir()?;
    let mut config = Config::load(&cwd)?;
    if let Some(root) = &cli.root {
        config.set_root(root, &cwd);
    }
    if cli.include_async {
        config.introspect.include_async = true;
    }
    let format = cli.format.unwrap_or(config.output.format);

    let root = project_root(&config)?;
    tracing::debug!(root = %root.display(), current = cli.current(), "completing");

    let resolver = Resolver::new(root)
        .introspector(Introspector::new().include_async(config.introspect.include_async));
    let completion = resolver.complete(cli.current())?;
    output::print_completion(&completion, format)?;
    Ok(())
}

/// The configured root, which must exist as a directory.
fn project_root(config: &Config) -> Result<PathBuf, CompleteError> {
    let root = config.project.root.clone().ok_or(CompleteError::MissingRoot)?;
    if !root.is_dir() {
        return Err(CompleteError::InvalidRoot(root));
    }
    Ok(root)
}
