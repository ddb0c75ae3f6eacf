//! HTTP variant of the bundler.
//!
//! `GET /bundle?imports=<json>&format=<esm|iife>` builds one bundle per
//! request and answers with the code as body and the metadata as headers.

mod responses;

use crate::error::{CliError, Result};
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use standalone_preact::{Engine, OutputFormat, Selection, registry::PackageSummary};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};

pub use responses::{bundle_response, error_response};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<Engine>,
}

/// Query string of `/bundle`.
#[derive(Debug, Deserialize)]
pub struct BundleQuery {
    /// JSON object `{ "<package>": ["<export>", ...] }`
    pub imports: Option<String>,
    /// `esm` (default) or `iife`
    pub format: Option<String>,
}

/// Build the router serving `engine`.
pub fn router(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/bundle", get(handle_bundle))
        .route("/registry", get(handle_registry))
        .route("/health", get(handle_health))
        .fallback(handle_not_found)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers(Any),
        )
        .with_state(AppState { engine })
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve(engine: Arc<Engine>, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| CliError::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    let warmup = Arc::clone(&engine);
    tokio::spawn(async move {
        if let Err(e) = warmup.initialize().await {
            crate::ui::error(&e.to_string());
        }
    });

    crate::ui::success(&format!("Serving bundles at http://{}/bundle", addr));

    axum::serve(listener, router(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CliError::Server(e.to_string()))?;

    crate::ui::info("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn handle_bundle(
    State(state): State<AppState>,
    query: std::result::Result<Query<BundleQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };

    let selection = match parse_selection(&query) {
        Ok(selection) => selection,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    match state.engine.build(&selection).await {
        Ok(bundle) => {
            tracing::debug!(filename = %bundle.filename, "Served bundle");
            bundle_response(&bundle)
        }
        Err(e) => {
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                tracing::error!("Bundle request failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            };
            error_response(status, &e.to_string())
        }
    }
}

fn parse_selection(query: &BundleQuery) -> standalone_preact::Result<Selection> {
    let format = match query.format.as_deref() {
        Some(format) => OutputFormat::parse(format)?,
        None => OutputFormat::default(),
    };

    let imports = query.imports.as_deref().ok_or_else(|| {
        standalone_preact::Error::InvalidSelection("missing 'imports' query parameter".to_string())
    })?;

    Selection::from_imports_json(imports, format)
}

async fn handle_registry(State(state): State<AppState>) -> Json<Vec<PackageSummary>> {
    Json(state.engine.registry().summaries())
}

async fn handle_health() -> &'static str {
    "ok"
}

async fn handle_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 Not Found")
}
