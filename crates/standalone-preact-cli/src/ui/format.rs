//! Formatting for bundle sizes and build summaries.

use owo_colors::{OwoColorize, Stream::Stderr};
use standalone_preact::BundleResult;

use super::is_quiet;

/// Format a size already rounded to one decimal place in kB.
///
/// ```
/// use standalone_preact_cli::ui::format_kb;
///
/// assert_eq!(format_kb(12.0), "12.0 kB");
/// assert_eq!(format_kb(4.3), "4.3 kB");
/// ```
pub fn format_kb(size: f64) -> String {
    format!("{:.1} kB", size)
}

/// Print the filename and both sizes of a finished bundle to stderr.
pub fn print_bundle_summary(bundle: &BundleResult) {
    if is_quiet() {
        return;
    }
    eprintln!();
    eprintln!("{}", "Bundle:".if_supports_color(Stderr, |t| t.bold()));
    eprintln!(
        "  file  {}",
        bundle.filename.if_supports_color(Stderr, |t| t.cyan())
    );
    eprintln!("  size  {}", format_kb(bundle.size_kb));
    eprintln!(
        "  gzip  {}",
        format_kb(bundle.size_gzipped_kb).if_supports_color(Stderr, |t| t.green())
    );
}
