//! In-process Rolldown invocation.
//!
//! [`compile`] bundles a synthetic entry against the registry and returns the
//! minified entry chunk. The output body contains no timestamps, so identical
//! source and registry always produce identical bytes.

mod registry_plugin;

pub use registry_plugin::{ENTRY_ID, RegistryPlugin};

use std::path::PathBuf;
use std::sync::Arc;

use rolldown::{BundlerBuilder, BundlerOptions, InputItem, Platform, RawMinifyOptions};
use rolldown_common::Output;
use rolldown_plugin::__inner::SharedPluginable;

use crate::registry::Registry;
use crate::selection::OutputFormat;
use crate::{Error, Result};

/// Name Rolldown gives the single entry chunk.
const ENTRY_NAME: &str = "standalone-preact";

/// Settings for one Rolldown run.
#[derive(Debug, Clone)]
pub(crate) struct CompilePlan {
    pub plugin: RegistryPlugin,
    pub format: OutputFormat,
    pub minify: bool,
    /// Resolution root; only meaningful when imports fall through to disk.
    pub cwd: Option<PathBuf>,
}

/// Compile `source` with every import served from `registry`.
///
/// Tree-shaking and minification are always on.
pub async fn compile(registry: Arc<Registry>, source: &str, format: OutputFormat) -> Result<String> {
    let plan = CompilePlan {
        plugin: RegistryPlugin::new(registry, source),
        format,
        minify: true,
        cwd: None,
    };
    execute(plan).await
}

/// Run Rolldown once and return the entry chunk's code.
pub(crate) async fn execute(plan: CompilePlan) -> Result<String> {
    let CompilePlan {
        plugin,
        format,
        minify,
        cwd,
    } = plan;

    let options = BundlerOptions {
        input: Some(vec![InputItem {
            name: Some(ENTRY_NAME.to_string()),
            import: ENTRY_ID.to_string(),
        }]),
        format: Some(format.to_rolldown()),
        platform: Some(Platform::Browser),
        minify: minify.then(|| RawMinifyOptions::from(true)),
        cwd,
        ..Default::default()
    };

    let plugins: Vec<SharedPluginable> = vec![Arc::new(plugin)];

    let mut bundler = BundlerBuilder::default()
        .with_options(options)
        .with_plugins(plugins)
        .build()
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    let bundle = bundler
        .generate()
        .await
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    if !bundle.warnings.is_empty() {
        tracing::debug!(count = bundle.warnings.len(), "Rolldown reported warnings");
    }

    let code = bundle
        .assets
        .iter()
        .find_map(|asset| match asset {
            Output::Chunk(chunk) if chunk.is_entry => Some(chunk.code.to_string()),
            _ => None,
        })
        .ok_or_else(|| {
            Error::BundleCompile(vec![crate::diagnostics::ExtractedDiagnostic::error(
                crate::diagnostics::DiagnosticKind::Other("MissingChunk".to_string()),
                "Rolldown produced no entry chunk",
            )])
        })?;

    tracing::debug!(format = %format, bytes = code.len(), "Compiled bundle");
    Ok(code)
}
