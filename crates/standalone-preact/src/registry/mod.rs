//! In-memory module registry.
//!
//! The [`Registry`] is a read-only snapshot of the source, public export names
//! and version of each package a selection may reference. It is built once,
//! wrapped in an `Arc` and shared by the synthesizer and the bundler plugin;
//! nothing mutates it afterwards.
//!
//! On disk the registry is a JSON object keyed by package name:
//!
//! ```json
//! {
//!   "preact": { "code": "...", "version": "10.19.3", "exports": ["h", "render"] },
//!   "htm": { "code": "...", "version": "3.1.1", "exports": ["htm"] }
//! }
//! ```

pub mod exports;
pub mod snapshot;

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub use exports::{ModuleExports, collect_exports};
pub use snapshot::{SNAPSHOT_PACKAGES, SnapshotOptions, build_snapshot};

/// One package in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    /// Raw ES module source. Its only imports are other registry keys.
    pub code: String,
    /// Semantic version string shown in bundle headers.
    pub version: String,
    /// Public export names offered to the user, in display order.
    pub exports: Vec<String>,
}

impl ModuleEntry {
    pub fn new(
        code: impl Into<String>,
        version: impl Into<String>,
        exports: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            code: code.into(),
            version: version.into(),
            exports: exports.into_iter().map(Into::into).collect(),
        }
    }
}

/// Summary of one package, as listed to UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    pub package: String,
    pub version: String,
    pub exports: Vec<String>,
}

/// Read-only mapping from package name to [`ModuleEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    modules: IndexMap<String, ModuleEntry>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Parse a registry from snapshot JSON.
    pub fn from_snapshot_json(json: &str) -> Result<Self> {
        let modules: IndexMap<String, ModuleEntry> = serde_json::from_str(json)
            .map_err(|e| Error::Registry(format!("invalid snapshot JSON: {}", e)))?;
        let registry = Self { modules };
        registry.validate()?;
        Ok(registry)
    }

    /// Load a registry snapshot from disk.
    pub async fn from_snapshot_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| Error::Io {
            message: format!("Failed to read registry snapshot {}: {}", path.display(), e),
        })?;

        tracing::debug!(path = %path.display(), bytes = json.len(), "Loaded registry snapshot");
        Self::from_snapshot_json(&json)
    }

    /// Serialize the registry back to pretty-printed snapshot JSON.
    pub fn to_snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.modules)?)
    }

    /// Write the registry snapshot to disk, creating parent directories.
    pub async fn write_snapshot_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, self.to_snapshot_json()?)
            .await
            .map_err(|e| Error::Io {
                message: format!("Failed to write registry snapshot {}: {}", path.display(), e),
            })
    }

    pub fn get(&self, package: &str) -> Option<&ModuleEntry> {
        self.modules.get(package)
    }

    pub fn contains(&self, package: &str) -> bool {
        self.modules.contains_key(package)
    }

    /// Look up a package, failing with [`Error::UnknownPackage`].
    pub fn require(&self, package: &str) -> Result<&ModuleEntry> {
        self.get(package).ok_or_else(|| Error::UnknownPackage {
            package: package.to_string(),
            known: self.package_names().map(str::to_string).collect(),
        })
    }

    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleEntry)> {
        self.modules.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn summaries(&self) -> Vec<PackageSummary> {
        self.iter()
            .map(|(package, entry)| PackageSummary {
                package: package.to_string(),
                version: entry.version.clone(),
                exports: entry.exports.clone(),
            })
            .collect()
    }

    /// Structural checks applied whenever a registry is constructed.
    fn validate(&self) -> Result<()> {
        for (package, entry) in &self.modules {
            if package.trim().is_empty() {
                return Err(Error::Registry("package name cannot be empty".to_string()));
            }
            if entry.version.trim().is_empty() {
                return Err(Error::Registry(format!("package '{}' has no version", package)));
            }
        }
        Ok(())
    }

    /// Parse every module and check its declared exports actually exist.
    ///
    /// A package whose export list is just its own name exposes the module's
    /// default export under that name, so it must have one.
    pub fn verify_modules(&self) -> Result<()> {
        for (package, entry) in &self.modules {
            let found = collect_exports(&entry.code).map_err(|e| {
                Error::Registry(format!("package '{}' failed to parse: {}", package, e))
            })?;

            if is_default_binding(package, &entry.exports) {
                if !found.has_default() {
                    return Err(Error::Registry(format!(
                        "package '{}' is exposed as a default binding but has no default export",
                        package
                    )));
                }
                continue;
            }

            // Names can hide behind `export *`, which cannot be checked here.
            if !found.star_sources.is_empty() {
                continue;
            }

            let missing: Vec<&str> = entry
                .exports
                .iter()
                .map(String::as_str)
                .filter(|name| !found.contains(name))
                .collect();
            if !missing.is_empty() {
                return Err(Error::Registry(format!(
                    "package '{}' does not export: {}",
                    package,
                    missing.join(", ")
                )));
            }

            tracing::debug!(package = %package, exports = found.names.len(), "Verified registry module");
        }
        Ok(())
    }
}

/// Whether `exports` is the singleton `[package]`, meaning "import the whole
/// module's default binding under the package name".
pub(crate) fn is_default_binding<S: AsRef<str>>(package: &str, exports: &[S]) -> bool {
    exports.len() == 1 && exports[0].as_ref() == package
}

/// Incremental construction of a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    modules: IndexMap<String, ModuleEntry>,
}

impl RegistryBuilder {
    /// Add (or replace) one package.
    pub fn module(mut self, package: impl Into<String>, entry: ModuleEntry) -> Self {
        self.modules.insert(package.into(), entry);
        self
    }

    pub fn build(self) -> Result<Registry> {
        let registry = Registry {
            modules: self.modules,
        };
        registry.validate()?;
        Ok(registry)
    }
}
