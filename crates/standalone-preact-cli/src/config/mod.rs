//! Layered CLI configuration.
//!
//! Priority: CLI flags > `STANDALONE_PREACT_*` environment > config file > defaults

mod loading;
mod tests;

use serde::{Deserialize, Serialize};
use standalone_preact::OutputFormat;
use std::path::PathBuf;

pub use loading::{CONFIG_FILE, ENV_PREFIX};

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AppConfig {
    /// Registry snapshot file
    pub registry: PathBuf,

    /// Address `serve` binds to
    pub host: String,

    /// Port `serve` listens on
    pub port: u16,

    /// Directory `build` writes into
    pub out_dir: PathBuf,

    /// Format used when `build` gets no --format
    pub format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            registry: PathBuf::from("registry.json"),
            host: "127.0.0.1".to_string(),
            port: 9697,
            out_dir: PathBuf::from("dist"),
            format: OutputFormat::Esm,
        }
    }
}

impl AppConfig {
    /// `host:port` for the server listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether `host` only accepts connections from this machine.
    pub fn is_loopback(&self) -> bool {
        self.host == "localhost"
            || self
                .host
                .parse::<std::net::IpAddr>()
                .is_ok_and(|ip| ip.is_loopback())
    }
}

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}
