//! Import pass: lists imports and finds bindings that are never referenced.

use std::collections::HashSet;
use std::ops::ControlFlow;

use serde::Serialize;
use swc_ecma_ast::{ImportDecl, ImportSpecifier};

use crate::declare_pass;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Extra, Severity, sort_by_location};
use crate::parser::ParsedFile;
use crate::passes::helpers::element_root_ident;
use crate::passes::{Pass, PassMetadata};
use crate::visitor::{AstVisitor, Node, VisitorContext, walk_ast};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportInfo {
    pub source: String,
    pub specifiers: Vec<String>,
    pub line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportsReport {
    pub imports: Vec<ImportInfo>,
    /// Local names bound by imports and never referenced, in document order.
    pub unused: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

declare_pass!(
    ImportsPass,
    name = Imports,
    description = "Lists imports and reports bindings that are never used"
);

impl Pass for ImportsPass {
    type Output = ImportsReport;

    fn metadata(&self) -> &PassMetadata {
        &self.metadata
    }

    fn run(&self, file: &ParsedFile) -> ImportsReport {
        let Some(module) = file.module() else {
            return ImportsReport::default();
        };

        let ctx = VisitorContext::new(file);
        let mut visitor = ImportsVisitor::default();
        walk_ast(module, &mut visitor, &ctx);

        let mut report = ImportsReport {
            imports: visitor.imports,
            ..Default::default()
        };

        for declared in visitor.declared {
            if visitor.used.contains(&declared.name) {
                continue;
            }
            report.diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::UnusedImport,
                    Severity::Warning,
                    format!("'{}' is imported but never used", declared.name),
                    declared.line,
                )
                .with_column(declared.column)
                .with_extra(Extra::Import {
                    name: declared.name.clone(),
                    source: declared.source,
                })
                .with_suggestion(format!("Remove the unused import '{}'", declared.name)),
            );
            report.unused.push(declared.name);
        }

        sort_by_location(&mut report.diagnostics);
        report
    }
}

struct Declared {
    name: String,
    source: String,
    line: usize,
    column: usize,
}

#[derive(Default)]
struct ImportsVisitor {
    import_depth: usize,
    imports: Vec<ImportInfo>,
    declared: Vec<Declared>,
    used: HashSet<String>,
}

impl ImportsVisitor {
    fn record_import(&mut self, decl: &ImportDecl, ctx: &VisitorContext) {
        let source = decl.src.value.to_string();
        let (line, _) = ctx.span_to_location(decl.span);

        let mut specifiers = Vec::with_capacity(decl.specifiers.len());
        for specifier in &decl.specifiers {
            let local = specifier_local(specifier);
            let (line, column) = ctx.span_to_location(local.span);
            let name = local.sym.to_string();

            specifiers.push(name.clone());
            self.declared.push(Declared {
                name,
                source: source.clone(),
                line,
                column,
            });
        }

        self.imports.push(ImportInfo {
            source,
            specifiers,
            line,
        });
    }
}

pub(crate) fn specifier_local(specifier: &ImportSpecifier) -> &swc_ecma_ast::Ident {
    match specifier {
        ImportSpecifier::Named(named) => &named.local,
        ImportSpecifier::Default(default) => &default.local,
        ImportSpecifier::Namespace(namespace) => &namespace.local,
    }
}

impl AstVisitor for ImportsVisitor {
    fn enter(&mut self, node: Node<'_>, ctx: &VisitorContext) -> ControlFlow<()> {
        match node {
            Node::ImportDecl(decl) => {
                self.import_depth += 1;
                self.record_import(decl, ctx);
            }
            Node::Ident(ident) if self.import_depth == 0 => {
                self.used.insert(ident.sym.to_string());
            }
            Node::JsxElementName(name) => {
                if let Some(root) = element_root_ident(name) {
                    self.used.insert(root.sym.to_string());
                }
            }
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn leave(&mut self, node: Node<'_>, _ctx: &VisitorContext) {
        if let Node::ImportDecl(_) = node {
            self.import_depth = self.import_depth.saturating_sub(1);
        }
    }
}
