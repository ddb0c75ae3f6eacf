//! Tracing subscriber setup for the CLI.
//!
//! Verbosity is resolved in this order:
//! 1. `--verbose`: debug for the workspace crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`, when set and valid
//! 4. info for the workspace crates
//!
//! ```rust,no_run
//! use standalone_preact_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("Serving bundles");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "standalone_preact=debug,standalone_preact_cli=debug";
const QUIET_FILTER: &str = "standalone_preact=error,standalone_preact_cli=error";
const DEFAULT_FILTER: &str = "standalone_preact=info,standalone_preact_cli=info";

/// Install the global subscriber. Call once, at the top of `main`.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Install the global subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
