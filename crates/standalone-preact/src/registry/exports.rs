//! Export-name extraction for registry modules.
//!
//! Walks the top-level statements of an ES module with OXC and collects the
//! names it exports. Used both to validate a snapshot at engine start and to
//! discover export lists when a snapshot is generated.

use oxc_allocator::Allocator;
use oxc_ast::ast::{BindingPatternKind, Declaration, ModuleDeclaration, ModuleExportName};
use oxc_parser::Parser;
use oxc_span::SourceType;

/// Exports found in one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleExports {
    /// Named exports in source order, `default` included when present.
    pub names: Vec<String>,
    /// `export * from "..."` sources, which can hide further names.
    pub star_sources: Vec<String>,
}

impl ModuleExports {
    pub fn has_default(&self) -> bool {
        self.names.iter().any(|n| n == "default")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

/// Parse `code` as an ES module and collect its exports.
///
/// Returns the first parse error message when the source is not valid.
pub fn collect_exports(code: &str) -> Result<ModuleExports, String> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, code, SourceType::mjs()).parse();

    if let Some(error) = parsed.errors.first() {
        return Err(error.to_string());
    }

    let mut exports = ModuleExports::default();

    for stmt in parsed.program.body.iter() {
        let Some(module_decl) = stmt.as_module_declaration() else {
            continue;
        };

        match module_decl {
            ModuleDeclaration::ExportDefaultDeclaration(_) => {
                exports.names.push("default".to_string());
            }
            ModuleDeclaration::ExportNamedDeclaration(named) => {
                for spec in &named.specifiers {
                    exports.names.push(export_name(&spec.exported));
                }
                if let Some(decl) = &named.declaration {
                    match decl {
                        Declaration::FunctionDeclaration(func) => {
                            if let Some(id) = &func.id {
                                exports.names.push(id.name.to_string());
                            }
                        }
                        Declaration::VariableDeclaration(var) => {
                            for declarator in &var.declarations {
                                if let BindingPatternKind::BindingIdentifier(ident) =
                                    &declarator.id.kind
                                {
                                    exports.names.push(ident.name.to_string());
                                }
                            }
                        }
                        Declaration::ClassDeclaration(class) => {
                            if let Some(id) = &class.id {
                                exports.names.push(id.name.to_string());
                            }
                        }
                        _ => {}
                    }
                }
            }
            ModuleDeclaration::ExportAllDeclaration(all) => match &all.exported {
                Some(name) => exports.names.push(export_name(name)),
                None => exports.star_sources.push(all.source.value.to_string()),
            },
            _ => {}
        }
    }

    Ok(exports)
}

fn export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}
