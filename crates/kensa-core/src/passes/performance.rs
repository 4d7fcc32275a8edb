//! Performance pass: re-render hazards.

use std::ops::ControlFlow;

use swc_ecma_ast::{BlockStmtOrExpr, CallExpr, Expr, JSXAttr, JSXAttrName, JSXAttrValue, JSXExpr};

use crate::declare_pass;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Extra, Severity, sort_by_location};
use crate::parser::ParsedFile;
use crate::passes::helpers::{EFFECT_HOOKS, array_arg, callee_ident, callee_member_prop};
use crate::passes::{Pass, PassMetadata};
use crate::visitor::{AstVisitor, Node, VisitorContext, walk_ast, walk_node};

const ITERATION_METHODS: &[&str] = &["map", "filter", "reduce", "forEach"];

declare_pass!(
    PerformancePass,
    name = Performance,
    description = "Flags inline object props and heavy work in mount-only effects"
);

impl Pass for PerformancePass {
    type Output = Vec<Diagnostic>;

    fn metadata(&self) -> &PassMetadata {
        &self.metadata
    }

    fn run(&self, file: &ParsedFile) -> Vec<Diagnostic> {
        let Some(module) = file.module() else {
            return Vec::new();
        };

        let ctx = VisitorContext::new(file);
        let mut visitor = PerformanceVisitor {
            diagnostics: Vec::new(),
        };
        walk_ast(module, &mut visitor, &ctx);

        sort_by_location(&mut visitor.diagnostics);
        visitor.diagnostics
    }
}

struct PerformanceVisitor {
    diagnostics: Vec<Diagnostic>,
}

impl PerformanceVisitor {
    fn check_attr(&mut self, attr: &JSXAttr, ctx: &VisitorContext) {
        let Some(JSXAttrValue::JSXExprContainer(container)) = &attr.value else {
            return;
        };
        let JSXExpr::Expr(expr) = &container.expr else {
            return;
        };
        let literal = match expr.as_ref() {
            Expr::Object(_) => "object",
            Expr::Array(_) => "array",
            _ => return,
        };

        let prop = match &attr.name {
            JSXAttrName::Ident(name) => name.sym.to_string(),
            JSXAttrName::JSXNamespacedName(name) => {
                format!("{}:{}", name.ns.sym, name.name.sym)
            }
        };
        let (line, column) = ctx.span_to_location(attr.span);

        self.diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::PerformanceConcern,
                Severity::Warning,
                format!("Inline {literal} literal in prop '{prop}' causes re-renders"),
                line,
            )
            .with_column(column)
            .with_extra(Extra::Prop { name: prop })
            .with_suggestion("Hoist the value out of the component or wrap it in useMemo"),
        );
    }

    fn check_effect(&mut self, call: &CallExpr, ctx: &VisitorContext) {
        let Some(hook) = callee_ident(call) else {
            return;
        };
        let name = hook.sym.as_ref();
        if !EFFECT_HOOKS.contains(&name) {
            return;
        }
        if !array_arg(call, 1).is_some_and(|deps| deps.elems.is_empty()) {
            return;
        }
        let Some(callback) = call.args.first() else {
            return;
        };

        let mut finder = IterationFinder { found: None };
        match callback.expr.as_ref() {
            Expr::Arrow(arrow) => match arrow.body.as_ref() {
                BlockStmtOrExpr::BlockStmt(block) => walk_node(block, &mut finder, ctx),
                BlockStmtOrExpr::Expr(expr) => walk_node(expr.as_ref(), &mut finder, ctx),
            },
            Expr::Fn(function) => {
                if let Some(body) = &function.function.body {
                    walk_node(body, &mut finder, ctx);
                }
            }
            _ => return,
        }

        if let Some(method) = finder.found {
            let (line, column) = ctx.span_to_location(call.span);
            self.diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::PerformanceConcern,
                    Severity::Warning,
                    format!(
                        "{name} with empty dependencies runs an expensive {method}() on mount"
                    ),
                    line,
                )
                .with_column(column)
                .with_extra(Extra::Hook {
                    name: name.to_string(),
                })
                .with_suggestion("Derive the data with useMemo or list its dependencies"),
            );
        }
    }
}

impl AstVisitor for PerformanceVisitor {
    fn enter(&mut self, node: Node<'_>, ctx: &VisitorContext) -> ControlFlow<()> {
        match node {
            Node::JsxAttr(attr) => self.check_attr(attr, ctx),
            Node::CallExpr(call) => self.check_effect(call, ctx),
            _ => {}
        }
        ControlFlow::Continue(())
    }
}

/// Stops at the first array iteration call inside an effect body.
struct IterationFinder {
    found: Option<&'static str>,
}

impl AstVisitor for IterationFinder {
    fn enter(&mut self, node: Node<'_>, _ctx: &VisitorContext) -> ControlFlow<()> {
        if let Node::CallExpr(call) = node
            && let Some(prop) = callee_member_prop(call)
            && let Some(method) = ITERATION_METHODS.iter().find(|m| **m == prop)
        {
            self.found = Some(*method);
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}
