//! Shared fixtures for standalone-preact integration tests.
//!
//! Provides a small in-memory registry whose modules mimic the public surface
//! of the real packages, plus assertions over built bundles.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use oxc_allocator::Allocator;
use oxc_ast::ast::{AssignmentExpression, AssignmentTarget, Expression, ObjectPropertyKind, PropertyKey};
use oxc_ast_visit::{Visit, walk};
use oxc_parser::Parser;
use oxc_span::SourceType;
use standalone_preact::registry::collect_exports;
use standalone_preact::{BundleResult, Engine, ModuleEntry, PackagerOptions, Registry};

pub const PREACT_VERSION: &str = "10.19.3";
pub const SIGNALS_VERSION: &str = "1.2.2";
pub const HTM_VERSION: &str = "3.1.1";

const PREACT_SOURCE: &str = r#"
export function h(type, props, ...children) {
    return { type, props: props || {}, children };
}
export function render(vnode, parent) {
    parent.textContent = JSON.stringify(vnode);
}
export class Component {
    constructor(props) {
        this.props = props;
        this.state = {};
    }
    setState(update) {
        this.state = Object.assign({}, this.state, update);
    }
}
export const Fragment = (props) => props.children;
"#;

const HOOKS_SOURCE: &str = r#"
export function useState(initial) {
    let value = initial;
    return [value, (next) => { value = next; }];
}
export function useEffect(effect) {
    effect();
}
"#;

const SIGNALS_SOURCE: &str = r#"
export function signal(value) {
    return { value };
}
export function computed(fn) {
    return { get value() { return fn(); } };
}
"#;

const HTM_SOURCE: &str = r#"
export default function htm(strings, ...values) {
    return this(strings.join(''), null, ...values);
}
"#;

/// Registry with `preact`, `preact/hooks`, `@preact/signals` and `htm`.
pub fn fake_registry() -> Registry {
    Registry::builder()
        .module(
            "preact",
            ModuleEntry::new(PREACT_SOURCE, PREACT_VERSION, ["h", "render", "Component", "Fragment"]),
        )
        .module(
            "preact/hooks",
            ModuleEntry::new(HOOKS_SOURCE, PREACT_VERSION, ["useState", "useEffect"]),
        )
        .module(
            "@preact/signals",
            ModuleEntry::new(SIGNALS_SOURCE, SIGNALS_VERSION, ["signal", "computed"]),
        )
        .module("htm", ModuleEntry::new(HTM_SOURCE, HTM_VERSION, ["htm"]))
        .build()
        .expect("fake registry")
}

/// Packager options with a fixed build date, so whole bundles compare equal.
pub fn fixed_options() -> PackagerOptions {
    PackagerOptions::default().with_build_date(NaiveDate::from_ymd_opt(2024, 1, 15).expect("date"))
}

pub fn test_engine() -> Arc<Engine> {
    Arc::new(Engine::with_options(fake_registry(), fixed_options()))
}

/// Header comment lines that describe packages (`// pkg@version (...)`).
pub fn package_header_lines(bundle: &BundleResult) -> Vec<&str> {
    bundle
        .code
        .lines()
        .skip(3)
        .take_while(|line| line.starts_with("// ") && line.contains('@') && line.ends_with(')'))
        .collect()
}

/// Names exported by an ESM bundle, parsed from its code.
pub fn module_exports(bundle: &BundleResult) -> BTreeSet<String> {
    collect_exports(&bundle.code)
        .unwrap_or_else(|e| panic!("bundle is not a valid module: {e}\n{}", bundle.code))
        .names
        .into_iter()
        .collect()
}

pub fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Property keys of every `window.<namespace> = { ... }` assignment in `code`.
pub fn global_assignments(code: &str, namespace: &str) -> Vec<BTreeSet<String>> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, code, SourceType::mjs()).parse();
    assert!(parsed.errors.is_empty(), "bundle does not parse: {:?}\n{code}", parsed.errors);

    let mut finder = GlobalAssignments { namespace, found: Vec::new() };
    finder.visit_program(&parsed.program);
    finder.found
}

struct GlobalAssignments<'n> {
    namespace: &'n str,
    found: Vec<BTreeSet<String>>,
}

impl<'a> Visit<'a> for GlobalAssignments<'_> {
    fn visit_assignment_expression(&mut self, expr: &AssignmentExpression<'a>) {
        let targets_namespace = match &expr.left {
            AssignmentTarget::StaticMemberExpression(member) => {
                matches!(&member.object, Expression::Identifier(id) if id.name == "window")
                    && member.property.name == self.namespace
            }
            _ => false,
        };

        if targets_namespace {
            let Expression::ObjectExpression(object) = &expr.right else {
                panic!("window.{} is not assigned an object literal", self.namespace);
            };
            let keys = object
                .properties
                .iter()
                .map(|property| match property {
                    ObjectPropertyKind::ObjectProperty(property) => match &property.key {
                        PropertyKey::StaticIdentifier(ident) => ident.name.to_string(),
                        PropertyKey::StringLiteral(lit) => lit.value.to_string(),
                        other => panic!("unexpected key {other:?}"),
                    },
                    ObjectPropertyKind::SpreadProperty(_) => panic!("unexpected spread"),
                })
                .collect();
            self.found.push(keys);
        }

        walk::walk_assignment_expression(self, expr);
    }
}
