//! `standalone-preact build`

use crate::cli::BuildArgs;
use crate::commands::load_engine;
use crate::config::AppConfig;
use crate::error::{Result, ResultExt};
use crate::ui;
use standalone_preact::{OutputFormat, Selection};
use std::io::Write;

/// Build one bundle and write it to disk or stdout.
pub async fn execute(args: BuildArgs, config: &AppConfig) -> Result<()> {
    let format: OutputFormat = args.format.map(Into::into).unwrap_or(config.format);
    let selection = selection_from_args(&args, format);

    let engine = load_engine(config).await?;
    let bundle = engine.build(&selection).await?;

    if args.stdout {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bundle.code.as_bytes())?;
        stdout.flush()?;
    } else {
        tokio::fs::create_dir_all(&config.out_dir)
            .await
            .context(format!("Failed to create {}", config.out_dir.display()))?;
        let path = config.out_dir.join(&bundle.filename);
        tokio::fs::write(&path, &bundle.code)
            .await
            .context(format!("Failed to write {}", path.display()))?;
        ui::success(&format!("Wrote {}", path.display()));
        ui::print_bundle_summary(&bundle);
    }

    if args.usage {
        eprintln!();
        eprintln!("{}", bundle.usage);
    }

    Ok(())
}

/// Without any `--import`, build the default selection in `format`.
pub(crate) fn selection_from_args(args: &BuildArgs, format: OutputFormat) -> Selection {
    if args.imports.is_empty() {
        return Selection::default_selection().with_format(format);
    }

    args.imports
        .iter()
        .fold(Selection::new(format), |selection, spec| {
            selection.with(spec.package.clone(), spec.exports.iter().cloned())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parse_import;

    fn args(imports: &[&str]) -> BuildArgs {
        BuildArgs {
            imports: imports.iter().map(|s| parse_import(s).unwrap()).collect(),
            format: None,
            out_dir: None,
            stdout: false,
            usage: false,
        }
    }

    #[test]
    fn test_default_selection_when_no_imports() {
        let selection = selection_from_args(&args(&[]), OutputFormat::Iife);
        assert!(selection.is_selected("preact", "render"));
        assert!(selection.is_selected("htm", "htm"));
        assert_eq!(selection.format(), OutputFormat::Iife);
    }

    #[test]
    fn test_repeated_imports_merge_per_package() {
        let selection = selection_from_args(
            &args(&["preact=h", "preact/hooks=useState", "preact=render"]),
            OutputFormat::Esm,
        );
        assert_eq!(selection.export_names(), vec!["h", "render", "useState"]);
    }
}
