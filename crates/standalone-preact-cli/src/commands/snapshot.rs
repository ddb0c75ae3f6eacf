//! `standalone-preact snapshot`

use crate::cli::SnapshotArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::ui;
use standalone_preact::registry::{SnapshotOptions, build_snapshot};

/// Compile every snapshot package from `node_modules` and write the registry.
pub async fn execute(args: SnapshotArgs, config: &AppConfig) -> Result<()> {
    if !args.node_modules.is_dir() {
        return Err(CliError::FileNotFound(args.node_modules));
    }

    let out = args.out.unwrap_or_else(|| config.registry.clone());
    let options = SnapshotOptions::new(&args.node_modules);

    ui::info(&format!(
        "Compiling {} from {}",
        options.packages.join(", "),
        args.node_modules.display()
    ));

    let registry = build_snapshot(&options).await?;
    registry.write_snapshot_file(&out).await?;

    for summary in registry.summaries() {
        ui::success(&format!(
            "{}@{} ({} exports)",
            summary.package,
            summary.version,
            summary.exports.len()
        ));
    }
    ui::success(&format!("Wrote {}", out.display()));
    Ok(())
}
