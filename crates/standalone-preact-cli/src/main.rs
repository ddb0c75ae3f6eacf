//! `standalone-preact` binary entry point.

use clap::Parser;
use miette::Result;
use standalone_preact_cli::{
    cli::{self, Command},
    commands,
    config::{AppConfig, Overrides},
    error, logger, ui,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::set_quiet(args.quiet);
    if args.no_color {
        ui::disable_colors();
    } else {
        ui::init_colors();
    }

    run(args).await.map_err(error::cli_error_to_miette)
}

async fn run(args: cli::Cli) -> error::Result<()> {
    let mut overrides = Overrides {
        registry: args.registry,
        ..Default::default()
    };

    match &args.command {
        Command::Build(build) => {
            overrides.out_dir = build.out_dir.clone();
            overrides.format = build.format.map(Into::into);
        }
        Command::Serve(serve) => {
            overrides.host = serve.host.clone();
            overrides.port = serve.port;
        }
        Command::Snapshot(_) => {}
    }

    let config = AppConfig::load(args.config.as_deref(), &overrides)?;
    tracing::debug!(?config, "Resolved configuration");

    match args.command {
        Command::Build(build) => commands::build_execute(build, &config).await,
        Command::Serve(serve) => commands::serve_execute(serve, &config).await,
        Command::Snapshot(snapshot) => commands::snapshot_execute(snapshot, &config).await,
    }
}
