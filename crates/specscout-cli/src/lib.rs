//! SpecScout CLI library.
//!
//! Argument parsing, configuration layering, the scan command and terminal
//! output for the `specscout` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, CliFormat, EngineArg};
pub use config::{Config, OutputFormat, RunSettings};
pub use error::{CliError, Result};
pub use output::Formatter;
