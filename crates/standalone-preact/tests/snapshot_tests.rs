mod helpers;

use std::path::Path;

use helpers::*;
use standalone_preact::registry::{SnapshotOptions, build_snapshot, collect_exports};
use standalone_preact::{Engine, Registry, Selection};
use tempfile::TempDir;

/// Unique string inside preact's `options` object, to count copies of preact.
const OPTIONS_MARKER: &str = "preact-options-singleton";

const PREACT_MODULE: &str = r#"
export const options = { marker: "preact-options-singleton" };
export function h(type, props) {
    if (options.vnode) options.vnode(type);
    return { type, props };
}
export function render(vnode, parent) {
    if (options.r) options.r(vnode);
    parent.textContent = String(vnode.type);
}
"#;

const HOOKS_MODULE: &str = r#"
import { options } from "preact";
let currentIndex = 0;
options.r = () => { currentIndex = 0; };
export function useState(initial) {
    currentIndex++;
    return [initial, () => {}];
}
export function useEffect(effect) {
    effect();
}
"#;

const SIGNALS_MODULE: &str = r#"
import { options } from "preact";
options.signals = true;
export function signal(value) {
    return { value };
}
export function computed(fn) {
    return { get value() { return fn(); } };
}
"#;

const HTM_MODULE: &str = r#"
export default function htm(strings) {
    return this(strings.join(""));
}
"#;

fn write(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

/// A project directory with the four snapshot packages installed.
fn fixture_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let modules = dir.path().join("node_modules");

    write(
        &modules.join("preact/package.json"),
        r#"{
            "name": "preact",
            "version": "10.19.3",
            "type": "module",
            "exports": {
                ".": "./dist/preact.mjs",
                "./hooks": "./hooks/dist/hooks.mjs"
            }
        }"#,
    );
    write(&modules.join("preact/dist/preact.mjs"), PREACT_MODULE);
    write(&modules.join("preact/hooks/dist/hooks.mjs"), HOOKS_MODULE);

    write(
        &modules.join("@preact/signals/package.json"),
        r#"{"name": "@preact/signals", "version": "1.2.2", "type": "module", "exports": "./dist/signals.mjs"}"#,
    );
    write(&modules.join("@preact/signals/dist/signals.mjs"), SIGNALS_MODULE);

    write(
        &modules.join("htm/package.json"),
        r#"{"name": "htm", "version": "3.1.1", "type": "module", "exports": "./dist/htm.mjs"}"#,
    );
    write(&modules.join("htm/dist/htm.mjs"), HTM_MODULE);

    dir
}

async fn snapshot(project: &TempDir) -> Registry {
    build_snapshot(&SnapshotOptions::new(project.path().join("node_modules")))
        .await
        .expect("snapshot")
}

#[tokio::test]
async fn snapshot_reads_versions_from_owning_packages() {
    let project = fixture_project();

    let registry = snapshot(&project).await;

    assert_eq!(registry.len(), 4);
    assert_eq!(registry.require("preact").unwrap().version, "10.19.3");
    assert_eq!(registry.require("preact/hooks").unwrap().version, "10.19.3");
    assert_eq!(registry.require("@preact/signals").unwrap().version, "1.2.2");
    assert_eq!(registry.require("htm").unwrap().version, "3.1.1");
}

#[tokio::test]
async fn snapshot_lists_named_exports() {
    let project = fixture_project();

    let registry = snapshot(&project).await;

    let exports = |package: &str| -> std::collections::BTreeSet<String> {
        registry.require(package).unwrap().exports.iter().cloned().collect()
    };
    assert_eq!(exports("preact"), names(&["h", "options", "render"]));
    assert_eq!(exports("preact/hooks"), names(&["useEffect", "useState"]));
    assert_eq!(exports("@preact/signals"), names(&["computed", "signal"]));
}

#[tokio::test]
async fn snapshot_exposes_htm_as_default_binding() {
    let project = fixture_project();

    let registry = snapshot(&project).await;

    let htm = registry.require("htm").unwrap();
    assert_eq!(htm.exports, vec!["htm".to_string()]);
    assert!(collect_exports(&htm.code).unwrap().has_default());
    registry.verify_modules().expect("snapshot verifies");
}

#[tokio::test]
async fn snapshot_keeps_sibling_packages_as_imports() {
    let project = fixture_project();

    let registry = snapshot(&project).await;

    for package in ["preact/hooks", "@preact/signals"] {
        let code = &registry.require(package).unwrap().code;
        assert!(code.contains("\"preact\""), "{package} lost its preact import:\n{code}");
        assert!(!code.contains(OPTIONS_MARKER), "{package} inlined preact:\n{code}");
    }
    assert!(registry.require("preact").unwrap().code.contains(OPTIONS_MARKER));
}

#[tokio::test]
async fn bundles_from_a_snapshot_share_one_preact() {
    let project = fixture_project();
    let registry = snapshot(&project).await;
    let engine = Engine::with_options(registry, fixed_options());
    let selection = Selection::default_selection()
        .with("preact/hooks", ["useState"])
        .with("@preact/signals", ["signal"]);

    let bundle = engine.build(&selection).await.expect("build");

    assert_eq!(bundle.code.matches(OPTIONS_MARKER).count(), 1, "{}", bundle.code);
    assert_eq!(
        module_exports(&bundle),
        names(&["h", "render", "htm", "html", "useState", "signal"])
    );
}
