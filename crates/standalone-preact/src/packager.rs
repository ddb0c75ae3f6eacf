//! Artifact packaging: header, content hash, filename and sizes.

use std::io::Write;

use chrono::NaiveDate;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::Result;
use crate::selection::OutputFormat;
use crate::synth::SyntheticModule;

/// Token in the usage template replaced by the real content hash.
pub const HASH_PLACEHOLDER: &str = "__BUNDLE_HASH__";

/// Hex characters of the digest kept in the hash.
const HASH_LEN: usize = 7;

/// Branding and naming of the produced artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagerOptions {
    pub product_name: String,
    pub product_version: String,
    /// Second header line, a full comment including the leading `//`.
    pub attribution: String,
    /// Global object the `iife` format attaches exports to.
    pub global_namespace: String,
    pub filename_prefix: String,
    /// Fixed header date; today's local date when `None`.
    pub build_date: Option<NaiveDate>,
}

impl Default for PackagerOptions {
    fn default() -> Self {
        Self {
            product_name: "Standalone Preact".to_string(),
            product_version: env!("CARGO_PKG_VERSION").to_string(),
            attribution: "// Preact: https://preactjs.com".to_string(),
            global_namespace: "standalonePreact".to_string(),
            filename_prefix: "standalone-preact".to_string(),
            build_date: None,
        }
    }
}

impl PackagerOptions {
    pub fn with_build_date(mut self, date: NaiveDate) -> Self {
        self.build_date = Some(date);
        self
    }

    /// `<prefix>.<format>.<hash>.js`
    pub fn bundle_filename(&self, format: OutputFormat, hash: &str) -> String {
        format!("{}.{}.{}.js", self.filename_prefix, format.as_str(), hash)
    }
}

/// A finished bundle, ready to be downloaded or served.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleResult {
    pub code: String,
    pub filename: String,
    pub usage: String,
    pub size_kb: f64,
    pub size_gzipped_kb: f64,
    pub hash: String,
    pub format: OutputFormat,
}

/// Wrap compiled code into a [`BundleResult`].
///
/// The hash is taken over `compiled` only, before the header is added, so it
/// does not change with the build date.
pub fn package(
    compiled: &str,
    module: &SyntheticModule,
    format: OutputFormat,
    options: &PackagerOptions,
) -> Result<BundleResult> {
    let hash = content_hash(compiled);
    let date = options
        .build_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let mut code = format!(
        "// {} v{} {} {} ({})\n{}\n\n",
        options.product_name,
        options.product_version,
        date.format("%Y-%m-%d"),
        hash,
        format.tag(),
        options.attribution,
    );
    for line in &module.header_comments {
        code.push_str(line);
        code.push('\n');
    }
    code.push_str(compiled);

    let size_kb = round_kb(code.len());
    let size_gzipped_kb = round_kb(gzip_len(code.as_bytes())?);

    Ok(BundleResult {
        filename: options.bundle_filename(format, &hash),
        usage: module.usage_template.replace(HASH_PLACEHOLDER, &hash),
        code,
        size_kb,
        size_gzipped_kb,
        hash,
        format,
    })
}

/// First seven hex characters of the SHA-256 digest of `code`.
pub fn content_hash(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..HASH_LEN].to_string()
}

fn gzip_len(data: &[u8]) -> Result<usize> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?.len())
}

/// Bytes to kilobytes, one decimal.
fn round_kb(bytes: usize) -> f64 {
    (bytes as f64 / 1024.0 * 10.0).round() / 10.0
}
