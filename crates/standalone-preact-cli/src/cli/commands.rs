use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::FormatArg;
use crate::cli::validation::{ImportSpec, parse_import};

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build one bundle from the selected exports
    ///
    /// Writes `standalone-preact.<format>.<hash>.js` into the output
    /// directory, or prints the code with --stdout.
    Build(BuildArgs),

    /// Serve bundles over HTTP
    ///
    /// `GET /bundle?imports=<json>&format=<esm|iife>` answers with the
    /// compiled file and its metadata headers.
    Serve(ServeArgs),

    /// Compile a registry snapshot from an installed node_modules
    Snapshot(SnapshotArgs),
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Exports to include, as <package>=<export>[,<export>...]
    ///
    /// Repeat the flag for each package. Without any --import the default
    /// selection (preact=h,render and htm=htm) is built.
    ///
    /// Examples:
    ///   standalone-preact build --import preact=h,render --import htm=htm
    ///   standalone-preact build --import @preact/signals=signal,computed
    #[arg(short, long = "import", value_name = "SPEC", value_parser = parse_import)]
    pub imports: Vec<ImportSpec>,

    /// Module format of the bundle
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Directory the bundle is written into
    #[arg(short = 'd', long, value_name = "DIR", conflicts_with = "stdout")]
    pub out_dir: Option<PathBuf>,

    /// Print the bundle to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Also print the HTML usage example
    #[arg(long)]
    pub usage: bool,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,
}

/// Arguments for the snapshot command
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// node_modules directory holding preact, @preact/signals and htm
    #[arg(long, default_value = "node_modules", value_name = "DIR")]
    pub node_modules: PathBuf,

    /// Where to write the snapshot
    ///
    /// Defaults to the configured registry path.
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}
