//! Conversion from CLI errors to miette reports.

use crate::error::CliError;
use miette::Report;

/// Convert a `CliError` into a miette `Report` for display in `main`.
///
/// Engine errors keep their diagnostic code and help text.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Engine(e) => Report::new(e),
        CliError::Config(e) => miette::miette!("{}", e),
        other => miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_errors_keep_their_code() {
        let report = cli_error_to_miette(CliError::Engine(standalone_preact::Error::EngineInit(
            "parse failure".into(),
        )));
        let code = report.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("ENGINE_INIT_ERROR"));
    }

    #[test]
    fn test_other_errors_render_message() {
        let report = cli_error_to_miette(CliError::InvalidArgument("--import".into()));
        assert_eq!(report.to_string(), "Invalid argument: --import");
    }
}
