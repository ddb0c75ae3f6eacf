/// One `--import` flag: a package and the exports taken from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub package: String,
    pub exports: Vec<String>,
}

/// Parse `--import <package>=<export>[,<export>...]`.
///
/// Whitespace around names is ignored and empty names are dropped. Export
/// names are checked later against the registry, so only the shape is
/// validated here.
///
/// Valid: `preact=h,render`, `@preact/signals=signal`, `htm=htm`
/// Invalid: `preact`, `=h`, `preact=`
pub fn parse_import(s: &str) -> Result<ImportSpec, String> {
    let (package, exports) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected <package>=<export>[,<export>...], got '{}'", s))?;

    let package = package.trim();
    if package.is_empty() {
        return Err(format!("Missing package name in '{}'", s));
    }

    let exports: Vec<String> = exports
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if exports.is_empty() {
        return Err(format!("No exports listed for '{}'", package));
    }

    Ok(ImportSpec {
        package: package.to_string(),
        exports,
    })
}
