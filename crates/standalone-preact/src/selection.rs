//! The user's choice of exports and output format.
//!
//! A [`Selection`] maps package names to an ordered set of export names and
//! carries the [`OutputFormat`]. Insertion order is preserved everywhere, since
//! it decides the order of the synthesized import lines, header comments and
//! export clause.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Output shape of the produced bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// ES module with a top-level `export { ... }` clause.
    #[default]
    #[serde(alias = "module")]
    Esm,
    /// Classic script attaching every export to one global object.
    #[serde(alias = "global")]
    Iife,
}

impl OutputFormat {
    /// Lower-case tag used in filenames and query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Esm => "esm",
            OutputFormat::Iife => "iife",
        }
    }

    /// Upper-case tag used in the bundle header.
    pub fn tag(&self) -> &'static str {
        match self {
            OutputFormat::Esm => "ESM",
            OutputFormat::Iife => "IIFE",
        }
    }

    /// Parse a format name.
    ///
    /// Accepts `esm`/`module` and `iife`/`global`, case-insensitively.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "esm" | "module" => Ok(Self::Esm),
            "iife" | "global" => Ok(Self::Iife),
            _ => Err(Error::InvalidSelection(format!(
                "Invalid format: '{}'. Expected: esm, iife",
                s
            ))),
        }
    }

    pub(crate) fn to_rolldown(self) -> rolldown::OutputFormat {
        match self {
            OutputFormat::Esm => rolldown::OutputFormat::Esm,
            OutputFormat::Iife => rolldown::OutputFormat::Iife,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Requested exports per package plus the output format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    imports: IndexMap<String, IndexSet<String>>,
    format: OutputFormat,
}

impl Selection {
    /// Create an empty selection.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            imports: IndexMap::new(),
            format,
        }
    }

    /// The selection a fresh UI starts with: `h`, `render` and `htm`.
    pub fn default_selection() -> Self {
        Self::new(OutputFormat::Esm)
            .with("preact", ["h", "render"])
            .with("htm", ["htm"])
    }

    /// Builder-style helper that appends exports for a package.
    pub fn with<I, S>(mut self, package: impl Into<String>, exports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = self.imports.entry(package.into()).or_default();
        set.extend(exports.into_iter().map(Into::into));
        self
    }

    /// Build a selection from any `package -> exports` iterator.
    pub fn from_imports<P, I, S>(imports: impl IntoIterator<Item = (P, I)>, format: OutputFormat) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        imports
            .into_iter()
            .fold(Self::new(format), |selection, (package, exports)| {
                selection.with(package, exports)
            })
    }

    /// Parse the JSON `imports` mapping sent by the HTTP variant.
    ///
    /// Packages with an empty export list are dropped, and every export name
    /// must be a plain JavaScript identifier.
    pub fn from_imports_json(json: &str, format: OutputFormat) -> Result<Self> {
        let raw: IndexMap<String, Vec<String>> = serde_json::from_str(json).map_err(|e| {
            Error::InvalidSelection(format!("imports must be a JSON object of string arrays: {}", e))
        })?;

        let selection = Self::from_imports(raw, format);
        selection.validate()?;
        Ok(selection)
    }

    /// Check that every package name is non-empty and every export name is a
    /// valid JavaScript identifier.
    pub fn validate(&self) -> Result<()> {
        for (package, exports) in &self.imports {
            if package.trim().is_empty() {
                return Err(Error::InvalidSelection("package name cannot be empty".to_string()));
            }
            if let Some(bad) = exports.iter().find(|name| !is_identifier(name)) {
                return Err(Error::InvalidSelection(format!(
                    "'{}' requested from '{}' is not a valid export name",
                    bad, package
                )));
            }
        }
        Ok(())
    }

    /// Check or uncheck one export of one package.
    ///
    /// Unchecking removes exactly `export` and drops the package entirely once
    /// nothing is left for it.
    pub fn toggle(&mut self, package: &str, export: &str, checked: bool) {
        if checked {
            self.imports
                .entry(package.to_string())
                .or_default()
                .insert(export.to_string());
            return;
        }

        if let Some(exports) = self.imports.get_mut(package) {
            exports.shift_remove(export);
            if exports.is_empty() {
                self.imports.shift_remove(package);
            }
        }
    }

    /// Whether `export` of `package` is currently checked.
    pub fn is_selected(&self, package: &str, export: &str) -> bool {
        self.imports
            .get(package)
            .is_some_and(|exports| exports.contains(export))
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Packages with a non-empty export set, in insertion order.
    pub fn packages(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.imports
            .iter()
            .filter(|(_, exports)| !exports.is_empty())
            .map(|(package, exports)| (package.as_str(), exports))
    }

    /// Every requested export across all packages, in order.
    pub fn export_names(&self) -> Vec<&str> {
        self.packages()
            .flat_map(|(_, exports)| exports.iter().map(String::as_str))
            .collect()
    }

    /// True when no package has any export checked.
    pub fn is_empty(&self) -> bool {
        self.packages().next().is_none()
    }
}

/// Whether `name` is a plain JavaScript identifier (ASCII subset).
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
