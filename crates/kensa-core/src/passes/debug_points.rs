//! Debug points: places worth a breakpoint or a log line while chasing a
//! rendering bug. Everything here is informational.

use std::ops::ControlFlow;

use swc_common::Spanned;
use swc_ecma_ast::{ArrayLit, CallExpr, Expr};

use crate::declare_pass;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Extra, Severity, sort_by_location};
use crate::parser::ParsedFile;
use crate::passes::helpers::{
    EFFECT_HOOKS, array_arg, callee_ident, callee_member_prop, is_setter_name,
};
use crate::passes::{Pass, PassMetadata};
use crate::visitor::{AstVisitor, Node, VisitorContext, walk_ast};

pub const EVENT_LISTENER_MESSAGE: &str = "Check for event listener cleanup";

declare_pass!(
    DebugPointsPass,
    name = DebugPoints,
    description = "Marks state updates, effects and event listeners"
);

impl Pass for DebugPointsPass {
    type Output = Vec<Diagnostic>;

    fn metadata(&self) -> &PassMetadata {
        &self.metadata
    }

    fn run(&self, file: &ParsedFile) -> Vec<Diagnostic> {
        let Some(module) = file.module() else {
            return Vec::new();
        };

        let ctx = VisitorContext::new(file);
        let mut visitor = DebugPointsVisitor {
            diagnostics: Vec::new(),
        };
        walk_ast(module, &mut visitor, &ctx);

        sort_by_location(&mut visitor.diagnostics);
        visitor.diagnostics
    }
}

struct DebugPointsVisitor {
    diagnostics: Vec<Diagnostic>,
}

impl DebugPointsVisitor {
    fn point(&mut self, call: &CallExpr, ctx: &VisitorContext, message: String, extra: Extra) {
        let (line, column) = ctx.span_to_location(call.span);
        self.diagnostics.push(
            Diagnostic::new(DiagnosticKind::DebugPoint, Severity::Info, message, line)
                .with_column(column)
                .with_extra(extra),
        );
    }
}

/// Plain identifiers listed in a dependency array.
fn effect_dependencies(deps: &ArrayLit) -> Vec<String> {
    deps.elems
        .iter()
        .flatten()
        .filter_map(|elem| match elem.expr.as_ref() {
            Expr::Ident(ident) => Some(ident.sym.to_string()),
            _ => None,
        })
        .collect()
}

/// Every dependency array entry as written, e.g. `props.id`.
fn dependency_texts<'a>(deps: &ArrayLit, ctx: &'a VisitorContext) -> Vec<&'a str> {
    deps.elems
        .iter()
        .flatten()
        .filter_map(|elem| ctx.get_source_text(elem.expr.span()))
        .collect()
}

impl AstVisitor for DebugPointsVisitor {
    fn enter(&mut self, node: Node<'_>, ctx: &VisitorContext) -> ControlFlow<()> {
        let Node::CallExpr(call) = node else {
            return ControlFlow::Continue(());
        };

        if let Some(ident) = callee_ident(call) {
            let name = ident.sym.as_ref();

            if is_setter_name(name) {
                self.point(
                    call,
                    ctx,
                    format!("State update with {name}"),
                    Extra::StateUpdate {
                        setter: name.to_string(),
                    },
                );
            } else if EFFECT_HOOKS.contains(&name) {
                let deps = array_arg(call, 1);
                let message = match deps {
                    None => format!("{name} without dependency array runs after every render"),
                    Some(deps) if deps.elems.is_empty() => format!("{name} runs once on mount"),
                    Some(deps) => format!(
                        "{name} re-runs when {} change",
                        dependency_texts(deps, ctx).join(", ")
                    ),
                };
                let dependencies = deps.map(effect_dependencies).unwrap_or_default();
                self.point(call, ctx, message, Extra::Effect { dependencies });
            }
        }

        let is_listener = callee_ident(call).is_some_and(|i| &*i.sym == "addEventListener")
            || callee_member_prop(call) == Some("addEventListener");
        if is_listener {
            self.point(
                call,
                ctx,
                EVENT_LISTENER_MESSAGE.to_string(),
                Extra::EventListener,
            );
        }

        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_debug_points(code: &str) -> Vec<Diagnostic> {
        let file = ParsedFile::from_source("App.jsx", code);
        DebugPointsPass::new().run(&file)
    }

    #[test]
    fn setter_calls_are_marked() {
        let diagnostics =
            run_debug_points("function App() { const [n, setCount] = useState(0); setCount(n + 1); }");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::DebugPoint);
        assert_eq!(diagnostics[0].severity, Severity::Info);
        assert_eq!(diagnostics[0].message, "State update with setCount");
    }

    #[test]
    fn effect_dependencies_are_extracted() {
        let diagnostics =
            run_debug_points("function App({ id, page }) { useEffect(() => load(id), [id, page]); }");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].extra,
            Some(Extra::Effect {
                dependencies: vec!["id".to_string(), "page".to_string()],
            })
        );
        assert_eq!(diagnostics[0].message, "useEffect re-runs when id, page change");
    }

    #[test]
    fn effect_messages_depend_on_dependency_array() {
        let diagnostics = run_debug_points(
            "function App() {\n  useEffect(() => {});\n  useLayoutEffect(() => {}, []);\n}",
        );

        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].message.contains("every render"));
        assert_eq!(diagnostics[1].message, "useLayoutEffect runs once on mount");
        assert_eq!(
            diagnostics[0].extra,
            Some(Extra::Effect {
                dependencies: Vec::new()
            })
        );
    }

    #[test]
    fn event_listeners_are_marked_bare_and_member() {
        let diagnostics = run_debug_points(
            "window.addEventListener('resize', onResize);\naddEventListener('scroll', onScroll);",
        );

        assert_eq!(diagnostics.len(), 2);
        assert!(
            diagnostics
                .iter()
                .all(|d| d.message == EVENT_LISTENER_MESSAGE && d.extra == Some(Extra::EventListener))
        );
        assert_eq!(diagnostics[1].line, 2);
    }

    #[test]
    fn member_dependency_is_not_a_mount_effect() {
        let diagnostics =
            run_debug_points("function App(props) { useEffect(() => load(props.id), [props.id]); }");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "useEffect re-runs when props.id change");
        assert_eq!(
            diagnostics[0].extra,
            Some(Extra::Effect {
                dependencies: Vec::new()
            })
        );
    }

    #[test]
    fn mixed_dependencies_keep_identifiers_in_extra() {
        let diagnostics = run_debug_points(
            "function App({ page }, ref) { useEffect(() => {}, [page, ref.current]); }",
        );

        assert_eq!(diagnostics[0].message, "useEffect re-runs when page, ref.current change");
        assert_eq!(
            diagnostics[0].extra,
            Some(Extra::Effect {
                dependencies: vec!["page".to_string()],
            })
        );
    }

    #[test]
    fn any_set_prefixed_call_is_a_state_update() {
        let diagnostics = run_debug_points("function App() { setvalue(1); set_value(2); }");

        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["State update with setvalue", "State update with set_value"]
        );
    }

    #[test]
    fn unrelated_calls_are_ignored() {
        let diagnostics = run_debug_points("set(); fetchData(); obj.setValue(1);");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn settings_call_counts_as_state_update() {
        let diagnostics = run_debug_points("settings();");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "State update with settings");
    }
}
