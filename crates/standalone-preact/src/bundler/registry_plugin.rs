//! Rolldown plugin that serves modules from the in-memory registry.
//!
//! The synthetic entry and every package it imports are resolved to their own
//! specifier and loaded straight from memory, so no filesystem or network
//! resolution ever happens for a bundle build.

use std::borrow::Cow;
use std::sync::Arc;

use anyhow::Context;
use rolldown_common::{ModuleType, ResolvedExternal};
use rolldown_plugin::{
    HookLoadArgs, HookLoadOutput, HookLoadReturn, HookResolveIdArgs, HookResolveIdOutput,
    HookResolveIdReturn, HookUsage, Plugin, PluginContext,
};

use crate::registry::Registry;

/// Module id of the synthetic entry.
pub const ENTRY_ID: &str = "standalone-preact:entry";

/// Plugin that redirects imports to the [`Registry`].
///
/// With a registry attached every specifier other than the entry must be a
/// registry key. Without one only the entry is virtual and the rest is left to
/// Rolldown's own resolver (used when snapshotting from `node_modules`), except
/// for the specifiers listed as external, which stay as bare imports.
#[derive(Debug, Clone)]
pub struct RegistryPlugin {
    entry_source: Arc<str>,
    registry: Option<Arc<Registry>>,
    externals: Arc<[String]>,
}

impl RegistryPlugin {
    /// Serve `entry_source` as the entry and every import from `registry`.
    pub fn new(registry: Arc<Registry>, entry_source: impl Into<Arc<str>>) -> Self {
        Self {
            entry_source: entry_source.into(),
            registry: Some(registry),
            externals: Arc::from([]),
        }
    }

    /// Serve only the entry; imports go through normal resolution.
    pub fn entry_only(entry_source: impl Into<Arc<str>>) -> Self {
        Self {
            entry_source: entry_source.into(),
            registry: None,
            externals: Arc::from([]),
        }
    }

    /// Leave imports of `specifiers` unbundled.
    ///
    /// Only consulted without a registry; with one, every import is served
    /// from memory.
    pub fn with_externals<I, S>(mut self, specifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.externals = specifiers.into_iter().map(Into::into).collect();
        self
    }

    /// Specifiers left as bare imports.
    pub fn externals(&self) -> &[String] {
        &self.externals
    }
}

fn claim(id: String) -> HookResolveIdReturn {
    resolved(id, false)
}

fn resolved(id: String, external: bool) -> HookResolveIdReturn {
    Ok(Some(HookResolveIdOutput {
        id: id.into(),
        external: Some(ResolvedExternal::Bool(external)),
        ..Default::default()
    }))
}

impl Plugin for RegistryPlugin {
    fn name(&self) -> Cow<'static, str> {
        "standalone-preact-registry".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::ResolveId | HookUsage::Load
    }

    /// Resolves the entry and registry packages to themselves.
    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let specifier = args.specifier.to_string();
        let registry = self.registry.clone();
        let external = self.externals.iter().any(|name| *name == specifier);

        async move {
            if specifier == ENTRY_ID {
                return claim(specifier);
            }

            let Some(registry) = registry else {
                if external {
                    return resolved(specifier, true);
                }
                return Ok(None);
            };

            if registry.contains(&specifier) {
                return claim(specifier);
            }

            anyhow::bail!(
                "'{}' is not in the module registry (available: {})",
                specifier,
                registry.package_names().collect::<Vec<_>>().join(", ")
            )
        }
    }

    /// Returns registry source as JavaScript, with no disk I/O.
    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let id = args.id.to_string();
        let entry_source = Arc::clone(&self.entry_source);
        let registry = self.registry.clone();

        async move {
            if id == ENTRY_ID {
                return Ok(Some(HookLoadOutput {
                    code: entry_source.as_ref().into(),
                    module_type: Some(ModuleType::Js),
                    ..Default::default()
                }));
            }

            let Some(registry) = registry else {
                return Ok(None);
            };

            let entry = registry
                .get(&id)
                .with_context(|| format!("Registry module disappeared during build: {}", id))?;

            Ok(Some(HookLoadOutput {
                code: entry.code.as_str().into(),
                module_type: Some(ModuleType::Js),
                ..Default::default()
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_externals_default_to_empty() {
        assert!(RegistryPlugin::entry_only("export {};").externals().is_empty());
    }

    #[test]
    fn test_with_externals() {
        let plugin = RegistryPlugin::entry_only("export * from 'preact/hooks';")
            .with_externals(["preact", "htm"]);
        assert_eq!(plugin.externals(), ["preact".to_string(), "htm".to_string()]);
    }
}
