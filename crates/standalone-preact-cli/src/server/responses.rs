use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use standalone_preact::BundleResult;

pub const SIZE_KB: HeaderName = HeaderName::from_static("x-bundle-sizekb");
pub const SIZE_GZIPPED_KB: HeaderName = HeaderName::from_static("x-bundle-sizegzippedkb");
pub const USAGE: HeaderName = HeaderName::from_static("x-bundle-usage");
pub const FILENAME: HeaderName = HeaderName::from_static("x-bundle-filename");

/// `Error: <message>` as plain text.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("Error: {}", message),
    )
        .into_response()
}

/// The compiled code plus its metadata headers.
pub fn bundle_response(bundle: &BundleResult) -> Response {
    match bundle_headers(bundle) {
        Ok(headers) => (StatusCode::OK, headers, bundle.code.clone()).into_response(),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("invalid bundle header: {}", e),
        ),
    }
}

fn bundle_headers(
    bundle: &BundleResult,
) -> std::result::Result<HeaderMap, header::InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/javascript; charset=utf-8"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", bundle.filename))?,
    );
    headers.insert(SIZE_KB, HeaderValue::from_str(&bundle.size_kb.to_string())?);
    headers.insert(
        SIZE_GZIPPED_KB,
        HeaderValue::from_str(&bundle.size_gzipped_kb.to_string())?,
    );
    headers.insert(USAGE, HeaderValue::from_str(&encode_usage(&bundle.usage))?);
    headers.insert(FILENAME, HeaderValue::from_str(&bundle.filename)?);
    Ok(headers)
}

/// Header values cannot carry newlines, so they become `<br>`.
fn encode_usage(usage: &str) -> String {
    usage.replace("\r\n", "<br>").replace('\n', "<br>")
}
