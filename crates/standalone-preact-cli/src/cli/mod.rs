//! Command-line interface definition.
//!
//! - `standalone-preact build`: write one bundle for a set of `--import`s
//! - `standalone-preact serve`: answer `/bundle` requests over HTTP
//! - `standalone-preact snapshot`: compile a registry snapshot from `node_modules`

mod commands;
pub mod enums;
mod tests;
mod validation;

use clap::Parser;
use std::path::PathBuf;

pub use commands::{BuildArgs, Command, ServeArgs, SnapshotArgs};
pub use enums::*;
pub use validation::{ImportSpec, parse_import};

/// Build single-file Preact bundles containing only the exports you pick
#[derive(Parser, Debug)]
#[command(
    name = "standalone-preact",
    version,
    about = "Build single-file Preact bundles containing only the exports you pick",
    long_about = "standalone-preact compiles a chosen subset of preact, preact/hooks,\n\
                  @preact/signals and htm into one self-contained ESM or IIFE file,\n\
                  together with a ready-to-paste HTML usage example."
)]
pub struct Cli {
    /// Registry snapshot to bundle from
    ///
    /// Overrides the `registry` key of the config file.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub registry: Option<PathBuf>,

    /// Config file to load instead of ./standalone-preact.json
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress status output; errors and requested output (--stdout, --usage) still print
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
