//! Hooks pass: records hook calls and flags the ones made outside any
//! function.
//!
//! Scope is tracked with a plain depth counter. Any enclosing function counts
//! as component scope, so a hook called from a nested helper is not flagged.

use std::ops::ControlFlow;

use serde::Serialize;

use crate::declare_pass;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Extra, Severity, sort_by_location};
use crate::parser::ParsedFile;
use crate::passes::helpers::{callee_ident, is_hook_name};
use crate::passes::{Pass, PassMetadata};
use crate::visitor::{AstVisitor, Node, VisitorContext, walk_ast};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookUsage {
    pub name: String,
    pub line: usize,
    pub inside_component_scope: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HooksReport {
    pub usages: Vec<HookUsage>,
    pub diagnostics: Vec<Diagnostic>,
}

impl HooksReport {
    pub fn count(&self, name: &str) -> usize {
        self.usages.iter().filter(|usage| usage.name == name).count()
    }

    pub fn uses(&self, name: &str) -> bool {
        self.usages.iter().any(|usage| usage.name == name)
    }
}

declare_pass!(
    HooksPass,
    name = Hooks,
    description = "Records hook calls and flags calls outside component scope"
);

impl Pass for HooksPass {
    type Output = HooksReport;

    fn metadata(&self) -> &PassMetadata {
        &self.metadata
    }

    fn run(&self, file: &ParsedFile) -> HooksReport {
        let Some(module) = file.module() else {
            return HooksReport::default();
        };

        let ctx = VisitorContext::new(file);
        let mut visitor = HooksVisitor::default();
        walk_ast(module, &mut visitor, &ctx);

        sort_by_location(&mut visitor.report.diagnostics);
        visitor.report
    }
}

#[derive(Default)]
struct HooksVisitor {
    depth: usize,
    report: HooksReport,
}

impl AstVisitor for HooksVisitor {
    fn enter(&mut self, node: Node<'_>, ctx: &VisitorContext) -> ControlFlow<()> {
        match node {
            _ if node.kind().is_function_like() => self.depth += 1,
            Node::CallExpr(call) => {
                if let Some(ident) = callee_ident(call)
                    && is_hook_name(ident.sym.as_ref())
                {
                    let name = ident.sym.to_string();
                    let (line, column) = ctx.span_to_location(call.span);
                    let inside_component_scope = self.depth > 0;

                    if !inside_component_scope {
                        self.report.diagnostics.push(
                            Diagnostic::new(
                                DiagnosticKind::HookMisuse,
                                Severity::Error,
                                format!("Hook {name} called outside component scope"),
                                line,
                            )
                            .with_column(column)
                            .with_extra(Extra::Hook { name: name.clone() })
                            .with_suggestion(
                                "Call hooks only from React function components or custom hooks",
                            ),
                        );
                    }

                    self.report.usages.push(HookUsage {
                        name,
                        line,
                        inside_component_scope,
                    });
                }
            }
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn leave(&mut self, node: Node<'_>, _ctx: &VisitorContext) {
        if node.kind().is_function_like() {
            self.depth = self.depth.saturating_sub(1);
        }
    }
}
