//! Complete partial dotted test paths (`pkg.mod.FooTest.test_`) by looking
//! at the filesystem and parsing Python sources, never importing them.
//!
//! ```no_run
//! use dotcomplete::resolver::Resolver;
//!
//! let resolver = Resolver::new("/path/to/project");
//! let completion = resolver.complete("tests.test_io.Reader").unwrap();
//! println!("{}", completion.completions.join(" "));
//! ```

pub mod cli;
pub mod config;
pub mod dotted;
pub mod errors;
pub mod introspect;
pub mod output;
pub mod prober;
pub mod resolver;
pub mod router;
pub mod types;
