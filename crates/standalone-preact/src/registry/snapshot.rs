//! Registry snapshot generation from an installed `node_modules` tree.
//!
//! Each package is bundled through `export * from "<pkg>"` into one minified
//! ES module, its version is read from the owning `package.json`, and its
//! public export names are read back from the compiled code.
//!
//! The other snapshotted packages stay external, so `preact/hooks` keeps its
//! `import ... from "preact"` and a built bundle links every package against
//! the one `preact` module in the registry.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{ModuleEntry, Registry, collect_exports};
use crate::bundler::{CompilePlan, RegistryPlugin, execute};
use crate::selection::OutputFormat;
use crate::{Error, Result};

/// Packages bundled into a snapshot by default.
pub const SNAPSHOT_PACKAGES: [&str; 4] = ["preact", "preact/hooks", "@preact/signals", "htm"];

/// Where to read packages from and which ones to snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    /// Path to the `node_modules` directory.
    pub node_modules: PathBuf,
    pub packages: Vec<String>,
}

impl SnapshotOptions {
    pub fn new(node_modules: impl Into<PathBuf>) -> Self {
        Self {
            node_modules: node_modules.into(),
            packages: SNAPSHOT_PACKAGES.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages = packages.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Deserialize)]
struct PackageManifest {
    version: String,
}

/// Build a [`Registry`] from the packages installed under `node_modules`.
pub async fn build_snapshot(options: &SnapshotOptions) -> Result<Registry> {
    let project_root = options
        .node_modules
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut builder = Registry::builder();

    for package in &options.packages {
        let version = read_version(&options.node_modules, package).await?;

        let entry_source = format!("export * from {};\n", serde_json::to_string(package)?);
        let needs_default = package == "htm";
        let entry_source = if needs_default {
            format!(
                "{entry_source}export {{ default }} from {};\n",
                serde_json::to_string(package)?
            )
        } else {
            entry_source
        };

        let siblings = options.packages.iter().filter(|other| *other != package);

        let code = execute(CompilePlan {
            plugin: RegistryPlugin::entry_only(entry_source).with_externals(siblings.cloned()),
            format: OutputFormat::Esm,
            minify: true,
            cwd: Some(project_root.clone()),
        })
        .await?;

        let exports = if needs_default {
            vec![package.clone()]
        } else {
            collect_exports(&code)
                .map_err(|e| {
                    Error::Registry(format!("compiled '{}' does not parse: {}", package, e))
                })?
                .names
                .into_iter()
                .filter(|name| name != "default")
                .collect()
        };

        tracing::info!(package = %package, version = %version, exports = exports.len(), "Snapshotted package");
        builder = builder.module(package.clone(), ModuleEntry::new(code, version, exports));
    }

    builder.build()
}

/// Read the version of the package that owns `package` (`preact/hooks` is
/// versioned by `preact`).
async fn read_version(node_modules: &Path, package: &str) -> Result<String> {
    let manifest_path = node_modules.join(package_root(package)).join("package.json");
    let json = tokio::fs::read_to_string(&manifest_path)
        .await
        .map_err(|e| Error::Io {
            message: format!("Failed to read {}: {}", manifest_path.display(), e),
        })?;

    let manifest: PackageManifest = serde_json::from_str(&json).map_err(|e| {
        Error::Registry(format!("invalid {}: {}", manifest_path.display(), e))
    })?;
    Ok(manifest.version)
}

/// `@scope/name/sub` → `@scope/name`, `name/sub` → `name`.
fn package_root(package: &str) -> &str {
    let segments = if package.starts_with('@') { 2 } else { 1 };
    match package.match_indices('/').nth(segments - 1) {
        Some((idx, _)) => &package[..idx],
        None => package,
    }
}
