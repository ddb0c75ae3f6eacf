//! The bundling engine: registry, one-time setup and the build pipeline.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::packager::{BundleResult, PackagerOptions, package};
use crate::registry::Registry;
use crate::selection::Selection;
use crate::synth::synthesize;
use crate::{Error, Result, bundler};

/// Process-wide bundling engine.
///
/// Cheap to share behind an `Arc`. The first [`build`](Engine::build) (or an
/// explicit [`initialize`](Engine::initialize)) verifies every registry module
/// once; concurrent callers wait on the same setup. A failed setup is kept and
/// returned to every later build.
#[derive(Debug)]
pub struct Engine {
    registry: Arc<Registry>,
    options: PackagerOptions,
    init: OnceCell<std::result::Result<(), Error>>,
}

impl Engine {
    pub fn new(registry: Registry) -> Self {
        Self::with_options(registry, PackagerOptions::default())
    }

    pub fn with_options(registry: Registry, options: PackagerOptions) -> Self {
        Self {
            registry: Arc::new(registry),
            options,
            init: OnceCell::new(),
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn options(&self) -> &PackagerOptions {
        &self.options
    }

    /// Run the one-time setup, or return its cached outcome.
    pub async fn initialize(&self) -> Result<()> {
        self.init
            .get_or_init(|| async {
                let registry = Arc::clone(&self.registry);
                let outcome = tokio::task::spawn_blocking(move || registry.verify_modules())
                    .await
                    .map_err(|e| Error::EngineInit(format!("setup task failed: {}", e)))
                    .and_then(|verified| verified.map_err(|e| Error::EngineInit(e.to_string())));

                match &outcome {
                    Ok(()) => tracing::info!(packages = self.registry.len(), "Engine initialized"),
                    Err(e) => tracing::error!(error = %e, "Engine initialization failed"),
                }
                outcome
            })
            .await
            .clone()
    }

    /// Build a bundle for `selection`.
    pub async fn build(&self, selection: &Selection) -> Result<BundleResult> {
        selection.validate()?;
        self.initialize().await?;

        let format = selection.format();
        let module = synthesize(&self.registry, selection, &self.options)?;
        let compiled = bundler::compile(Arc::clone(&self.registry), &module.source, format).await?;
        let result = package(&compiled, &module, format, &self.options)?;

        tracing::debug!(
            filename = %result.filename,
            size_kb = result.size_kb,
            gzipped_kb = result.size_gzipped_kb,
            "Built bundle"
        );
        Ok(result)
    }
}
