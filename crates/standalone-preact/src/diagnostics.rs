//! Diagnostic extraction from Rolldown errors.
//!
//! Rolldown reports failures as a batch of build diagnostics. This module turns
//! that batch into plain, cloneable records carrying each diagnostic's rendered
//! message, so the UI layers above never depend on Rolldown's error types.

use rolldown_error::{BatchedBuildDiagnostic, BuildDiagnostic, EventKind, Severity};
use serde::{Deserialize, Serialize};

/// Extracted diagnostic information from Rolldown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDiagnostic {
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub help: Option<String>,
}

impl ExtractedDiagnostic {
    /// Build an error-level diagnostic from a bare message.
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: DiagnosticSeverity::Error,
            message: message.into(),
            help: None,
        }
    }
}

/// Diagnostic kind (mirrors the subset of Rolldown's event kinds we can hit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingExport,
    ParseError,
    UnresolvedImport,
    Plugin,
    Other(String),
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::MissingExport => write!(f, "MissingExport"),
            DiagnosticKind::ParseError => write!(f, "ParseError"),
            DiagnosticKind::UnresolvedImport => write!(f, "UnresolvedImport"),
            DiagnosticKind::Plugin => write!(f, "Plugin"),
            DiagnosticKind::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// Extract diagnostics from a Rolldown error batch.
pub fn extract_from_batch(batch: &BatchedBuildDiagnostic) -> Vec<ExtractedDiagnostic> {
    batch.iter().map(extract_diagnostic).collect()
}

/// Convert one Rolldown diagnostic, keeping its rendered message.
pub fn extract_diagnostic(diagnostic: &BuildDiagnostic) -> ExtractedDiagnostic {
    let kind = match diagnostic.kind() {
        EventKind::MissingExportError => DiagnosticKind::MissingExport,
        EventKind::ParseError => DiagnosticKind::ParseError,
        EventKind::UnresolvedImport | EventKind::ResolveError => DiagnosticKind::UnresolvedImport,
        EventKind::PluginError => DiagnosticKind::Plugin,
        other => DiagnosticKind::Other(other.to_string()),
    };

    let severity = match diagnostic.severity() {
        Severity::Error => DiagnosticSeverity::Error,
        Severity::Warning => DiagnosticSeverity::Warning,
    };

    let message = diagnostic.to_string();
    let message = match kind {
        DiagnosticKind::ParseError => unquote_parse_message(&message),
        _ => message.trim().to_string(),
    };

    ExtractedDiagnostic {
        kind,
        severity,
        message,
        help: extract_help_text(&diagnostic.to_diagnostic().to_string()),
    }
}

/// Concatenate the messages of a diagnostic list for display.
pub fn join_messages(diagnostics: &[ExtractedDiagnostic]) -> String {
    if diagnostics.is_empty() {
        return "Unknown bundler error".to_string();
    }
    diagnostics
        .iter()
        .map(|d| d.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse errors arrive as `Parse failed, got: "<quoted text>"`.
fn unquote_parse_message(message: &str) -> String {
    const PREFIX: &str = "Parse failed, got: ";

    let Some(quoted) = message.trim().strip_prefix(PREFIX) else {
        return message.trim().to_string();
    };
    match serde_json::from_str::<String>(quoted) {
        Ok(text) => format!("Parse failed: {text}"),
        Err(_) => format!("Parse failed: {}", quoted.trim_matches('"')),
    }
}

/// Extract help text from error message.
fn extract_help_text(text: &str) -> Option<String> {
    for indicator in &["help: ", "Help: ", "hint: ", "Hint: "] {
        if let Some(pos) = text.find(indicator) {
            let after = &text[pos + indicator.len()..];
            let help_str: String = after.lines().next().unwrap_or("").trim().to_string();
            if !help_str.is_empty() {
                return Some(help_str);
            }
        }
    }
    None
}
