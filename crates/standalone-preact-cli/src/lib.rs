//! Command-line front end and HTTP server for `standalone-preact`.
//!
//! - [`cli`]: clap argument definitions
//! - [`config`]: figment-layered settings (file, environment, flags)
//! - [`commands`]: `build`, `serve` and `snapshot`
//! - [`server`]: the axum router behind `serve`
//! - [`error`]: `CliError` with actionable hints, rendered through miette
//! - [`logger`] and [`ui`]: tracing setup and terminal status lines
//!
//! ```rust,no_run
//! use standalone_preact_cli::{config::{AppConfig, Overrides}, error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     let config = AppConfig::load(None, &Overrides::default())?;
//!     println!("registry: {}", config.registry.display());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod server;
pub mod ui;

pub use config::{AppConfig, Overrides};
pub use error::{CliError, ConfigError, Result};
