//! `standalone-preact serve`

use crate::cli::ServeArgs;
use crate::commands::load_engine;
use crate::config::AppConfig;
use crate::error::Result;
use crate::server;
use crate::ui;

/// Serve `/bundle` on the configured address until Ctrl+C.
///
/// `--host` and `--port` are already folded into `config`.
pub async fn execute(_args: ServeArgs, config: &AppConfig) -> Result<()> {
    if let Some(warning) = exposure_warning(config) {
        ui::warning(&warning);
    }

    let engine = load_engine(config).await?;
    server::serve(engine, &config.bind_address()).await
}

/// CORS is open to any origin, so binding past loopback publishes the bundler.
fn exposure_warning(config: &AppConfig) -> Option<String> {
    if config.is_loopback() {
        return None;
    }
    Some(format!(
        "Listening on {} makes /bundle reachable from other machines",
        config.host
    ))
}
