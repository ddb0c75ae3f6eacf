//! Shared fixtures for CLI and server tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use standalone_preact::{Engine, ModuleEntry, Registry};

const PREACT_SOURCE: &str = r#"
export function h(type, props, ...children) {
    return { type, props: props || {}, children };
}
export function render(vnode, parent) {
    parent.textContent = JSON.stringify(vnode);
}
"#;

const HOOKS_SOURCE: &str = r#"
export function useState(initial) {
    return [initial, () => {}];
}
"#;

const HTM_SOURCE: &str = r#"
export default function htm(strings, ...values) {
    return this(strings.join(''), null, ...values);
}
"#;

/// Small registry with `preact`, `preact/hooks` and `htm`.
pub fn fake_registry() -> Registry {
    Registry::builder()
        .module("preact", ModuleEntry::new(PREACT_SOURCE, "10.19.3", ["h", "render"]))
        .module("preact/hooks", ModuleEntry::new(HOOKS_SOURCE, "10.19.3", ["useState"]))
        .module("htm", ModuleEntry::new(HTM_SOURCE, "3.1.1", ["htm"]))
        .build()
        .expect("fake registry")
}

/// Registry whose `preact` entry declares an export its code lacks.
pub fn broken_registry() -> Registry {
    Registry::builder()
        .module(
            "preact",
            ModuleEntry::new("export function h() {}", "10.19.3", ["h", "render"]),
        )
        .build()
        .expect("broken registry")
}

pub fn test_engine() -> Arc<Engine> {
    Arc::new(Engine::new(fake_registry()))
}

/// Write the fake registry as `registry.json` under `dir`.
pub fn write_registry(dir: &Path) -> PathBuf {
    let path = dir.join("registry.json");
    let json = fake_registry().to_snapshot_json().expect("snapshot json");
    std::fs::write(&path, json).expect("write registry");
    path
}

/// Percent-encode a query parameter value.
pub fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}

/// `/bundle` URI for an imports JSON object and a format.
pub fn bundle_uri(imports: &str, format: &str) -> String {
    format!("/bundle?imports={}&format={}", encode(imports), format)
}
