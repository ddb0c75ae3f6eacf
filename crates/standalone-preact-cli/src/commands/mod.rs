//! Command implementations.
//!
//! Each command takes its parsed arguments plus the resolved [`AppConfig`]
//! and returns a [`Result`](crate::error::Result).

pub mod build;
pub mod serve;
pub mod snapshot;

use crate::config::AppConfig;
use crate::error::{Result, ResultExt};
use crate::ui;
use standalone_preact::{Engine, Registry};
use std::sync::Arc;

pub use build::execute as build_execute;
pub use serve::execute as serve_execute;
pub use snapshot::execute as snapshot_execute;

/// Load the configured registry snapshot and wrap it in an engine.
pub(crate) async fn load_engine(config: &AppConfig) -> Result<Arc<Engine>> {
    let registry = Registry::from_snapshot_file(&config.registry)
        .await
        .with_hint(format!(
            "Generate {} with `standalone-preact snapshot` or pass --registry",
            config.registry.display()
        ))?;

    ui::info(&format!(
        "Loaded {} packages from {}",
        registry.len(),
        config.registry.display()
    ));
    Ok(Arc::new(Engine::new(registry)))
}
