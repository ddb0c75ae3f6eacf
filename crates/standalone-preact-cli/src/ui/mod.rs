//! Terminal output helpers.
//!
//! Status lines go to stderr so `build --stdout` can be piped safely.
//! `--quiet` silences everything here except [`error`].
//!
//! ```no_run
//! use standalone_preact_cli::ui;
//!
//! ui::init_colors();
//! ui::success("Wrote dist/standalone-preact.esm.1a2b3c4.js");
//! ```

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_kb, print_bundle_summary};
pub use messages::{error, info, success, warning};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Silence status output process-wide, used for `--quiet`.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Check if color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`, then terminal detection decides.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Apply the color decision process-wide.
pub fn init_colors() {
    owo_colors::set_override(should_use_color());
}

/// Force plain output, used for `--no-color`.
pub fn disable_colors() {
    owo_colors::set_override(false);
}
