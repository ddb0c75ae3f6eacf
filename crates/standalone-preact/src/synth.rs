//! Synthetic entry module generation.
//!
//! Turns a [`Selection`] into the import/export source fed to the bundler,
//! the per-package header comments, and the usage snippet template.

use crate::Result;
use crate::packager::{HASH_PLACEHOLDER, PackagerOptions};
use crate::registry::{Registry, is_default_binding};
use crate::selection::{OutputFormat, Selection};
use crate::usage::{UsageContext, usage_example};

/// Package whose default export is the tagged-template helper.
const TEMPLATE_PACKAGE: &str = "htm";
/// Package providing the `h` element factory the helper binds to.
const RENDER_PACKAGE: &str = "preact";

/// Output of [`synthesize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticModule {
    /// Entry module source handed to the bundler.
    pub source: String,
    /// `// <package>@<version> (<exports>)`, one per package.
    pub header_comments: Vec<String>,
    /// Usage snippet with [`HASH_PLACEHOLDER`] standing in for the hash.
    pub usage_template: String,
    /// Every name the bundle exposes, `html` included when synthesized.
    pub exports: Vec<String>,
}

/// Build the synthetic entry for `selection`.
///
/// Fails with [`crate::Error::UnknownPackage`] before emitting anything if a
/// selected package is missing from the registry.
pub fn synthesize(
    registry: &Registry,
    selection: &Selection,
    options: &PackagerOptions,
) -> Result<SyntheticModule> {
    let mut import_lines = Vec::new();
    let mut header_comments = Vec::new();
    let mut exports: Vec<String> = Vec::new();

    for (package, names) in selection.packages() {
        let entry = registry.require(package)?;
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        let clause = if is_default_binding(package, &names) {
            package.to_string()
        } else {
            format!("{{ {} }}", names.join(", "))
        };
        import_lines.push(format!("import {} from '{}';", clause, package));
        header_comments.push(format!("// {}@{} ({})", package, entry.version, names.join(", ")));
        exports.extend(names.iter().map(|name| name.to_string()));
    }

    let mut source = String::new();
    for line in &import_lines {
        source.push_str(line);
        source.push('\n');
    }

    if binds_html(selection) {
        source.push_str("const html = htm.bind(h);\n");
        if !exports.iter().any(|name| name == "html") {
            exports.push("html".to_string());
        }
    }

    let list = exports.join(", ");
    match selection.format() {
        OutputFormat::Esm if exports.is_empty() => source.push_str("export {};\n"),
        OutputFormat::Esm => source.push_str(&format!("export {{ {} }};\n", list)),
        OutputFormat::Iife if exports.is_empty() => {
            source.push_str(&format!("window.{} = {{}};\n", options.global_namespace))
        }
        OutputFormat::Iife => source.push_str(&format!(
            "window.{} = {{ {} }};\n",
            options.global_namespace, list
        )),
    }

    let filename = options.bundle_filename(selection.format(), HASH_PLACEHOLDER);
    let usage_template = usage_example(&UsageContext {
        format: selection.format(),
        exports: &exports,
        filename: &filename,
        global_namespace: &options.global_namespace,
        title: &options.product_name,
    });

    tracing::debug!(
        packages = header_comments.len(),
        exports = exports.len(),
        format = %selection.format(),
        "Synthesized entry module"
    );

    Ok(SyntheticModule {
        source,
        header_comments,
        usage_template,
        exports,
    })
}

/// `html` is only bound when both `htm` and `h` are actually imported.
fn binds_html(selection: &Selection) -> bool {
    selection.is_selected(TEMPLATE_PACKAGE, TEMPLATE_PACKAGE) && selection.is_selected(RENDER_PACKAGE, "h")
}
