#![cfg_attr(docsrs, feature(doc_cfg))]

//! # standalone-preact
//!
//! Builds a single self-contained JavaScript file exposing exactly the Preact
//! ecosystem exports a user picked, plus a ready-to-paste usage snippet.
//!
//! The pipeline runs entirely in memory: a [`Selection`] is turned into a
//! synthetic entry module, Rolldown compiles it with every import redirected
//! to the [`Registry`], and the packager wraps the result with a header,
//! a content hash and size measurements.
//!
//! ## Quick Start
//!
//! ```no_run
//! use standalone_preact::{Engine, OutputFormat, Registry, Selection};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Registry::from_snapshot_file("registry.json").await?;
//! let engine = Engine::new(registry);
//!
//! let selection = Selection::new(OutputFormat::Esm)
//!     .with("preact", ["h", "render"])
//!     .with("htm", ["htm"]);
//!
//! let bundle = engine.build(&selection).await?;
//! std::fs::write(&bundle.filename, &bundle.code)?;
//! println!("{} ({} kB, {} kB gzipped)", bundle.filename, bundle.size_kb, bundle.size_gzipped_kb);
//! # Ok(()) }
//! ```

pub mod bundler;
pub mod diagnostics;
pub mod engine;
pub mod packager;
pub mod registry;
pub mod selection;
pub mod session;
pub mod synth;
pub mod usage;

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::{LogLevel, init_logging, init_logging_from_env};

pub use diagnostics::{DiagnosticKind, DiagnosticSeverity, ExtractedDiagnostic};
pub use engine::Engine;
pub use packager::{BundleResult, PackagerOptions};
pub use registry::{ModuleEntry, Registry, RegistryBuilder};
pub use selection::{OutputFormat, Selection};
pub use session::{BuildOutcome, BuildSequencer, BuildSession, BuildTicket, BuildView};
pub use synth::SyntheticModule;

/// Error types for standalone-preact operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The selection names a package that the registry does not contain.
    #[error("Unknown package '{package}'")]
    UnknownPackage { package: String, known: Vec<String> },

    /// The selection itself is malformed (bad format, bad export name, ...).
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Rolldown reported one or more diagnostics while compiling.
    #[error("{}", diagnostics::join_messages(.0))]
    BundleCompile(Vec<ExtractedDiagnostic>),

    /// The one-time engine setup failed. Sticky for the engine's lifetime.
    #[error("Engine initialization failed: {0}")]
    EngineInit(String),

    /// The registry snapshot is unreadable or inconsistent.
    #[error("Registry error: {0}")]
    Registry(String),

    /// I/O error.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(String),
}

/// Result type alias for standalone-preact operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a compile error from a Rolldown error batch.
    pub fn from_rolldown_batch(batch: &rolldown_error::BatchedBuildDiagnostic) -> Self {
        Error::BundleCompile(diagnostics::extract_from_batch(batch))
    }

    /// Whether the error was caused by the caller's input rather than the engine.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::UnknownPackage { .. } | Error::InvalidSelection(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::UnknownPackage { .. } => "UNKNOWN_PACKAGE",
            Error::InvalidSelection(_) => "INVALID_SELECTION",
            Error::BundleCompile(_) => "BUNDLE_COMPILE_ERROR",
            Error::EngineInit(_) => "ENGINE_INIT_ERROR",
            Error::Registry(_) => "REGISTRY_ERROR",
            Error::Io { .. } => "IO_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::UnknownPackage { known, .. } => Some(Box::new(format!(
                "Available packages: {}",
                known.join(", ")
            ))),
            Error::InvalidSelection(_) => Some(Box::new(
                "Exports must be plain identifiers, e.g. --import preact=h,render",
            )),
            Error::EngineInit(_) => Some(Box::new(
                "The registry snapshot could not be prepared. Regenerate it with `standalone-preact snapshot` and restart.",
            )),
            Error::Registry(_) => Some(Box::new(
                "Check that the registry snapshot is valid JSON of the form {\"pkg\": {\"code\", \"version\", \"exports\"}}",
            )),
            Error::BundleCompile(diagnostics) => {
                if diagnostics.len() == 1 {
                    diagnostics[0]
                        .help
                        .as_ref()
                        .map(|h| Box::new(h.clone()) as Box<dyn std::fmt::Display>)
                } else {
                    Some(Box::new(
                        "Multiple bundler errors occurred. See details above.".to_string(),
                    ))
                }
            }
            _ => None,
        }
    }
}
