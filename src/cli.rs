use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::types::OutputFormat;

/// dotcomplete - complete dotted test paths by parsing Python sources
#[derive(Parser, Debug)]
#[command(name = "dotcomplete", version, about)]
pub struct Cli {
    /// Partial dotted path to complete (e.g. `pkg.mod.FooTest.test_`)
    pub current: Option<String>,

    /// Project root that dotted paths are resolved against
    #[arg(long, env = "DOTCOMPLETE_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Output format (defaults to the configured format, else `plain`)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Also offer `async def` members as methods
    #[arg(long)]
    pub include_async: bool,

    /// Log resolution steps to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The string to complete; omitted means the empty string.
    pub fn current(&self) -> &str {
        self.current.as_deref().unwrap_or("")
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
