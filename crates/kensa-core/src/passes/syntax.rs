//! Syntax pass: parse failures and component naming conventions.
//!
//! The naming check is a heuristic. Every element whose tag is a plain
//! lowercase identifier is flagged, so built-in elements such as `div` are
//! reported too; there is deliberately no allow-list of intrinsic tags.

use std::ops::ControlFlow;

use swc_ecma_ast::JSXElementName;

use crate::declare_pass;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Extra, Severity, sort_by_location};
use crate::parser::{ParseError, ParsedFile};
use crate::passes::{Pass, PassMetadata};
use crate::visitor::{AstVisitor, Node, VisitorContext, walk_ast};

pub const UPPERCASE_MESSAGE: &str = "Component names should start with uppercase";

declare_pass!(
    SyntaxPass,
    name = Syntax,
    description = "Reports parse failures and lowercase component tags"
);

impl Pass for SyntaxPass {
    type Output = Vec<Diagnostic>;

    fn metadata(&self) -> &PassMetadata {
        &self.metadata
    }

    fn run(&self, file: &ParsedFile) -> Vec<Diagnostic> {
        let Some(module) = file.module() else {
            return file
                .parse_error()
                .map(parse_failure_diagnostic)
                .into_iter()
                .collect();
        };

        let ctx = VisitorContext::new(file);
        let mut visitor = SyntaxVisitor {
            diagnostics: Vec::new(),
        };

        walk_ast(module, &mut visitor, &ctx);
        sort_by_location(&mut visitor.diagnostics);
        visitor.diagnostics
    }
}

pub fn parse_failure_diagnostic(error: &ParseError) -> Diagnostic {
    Diagnostic::new(
        DiagnosticKind::ParseError,
        Severity::Error,
        error.message.clone(),
        error.line,
    )
    .with_column(error.column)
}

struct SyntaxVisitor {
    diagnostics: Vec<Diagnostic>,
}

impl AstVisitor for SyntaxVisitor {
    fn enter(&mut self, node: Node<'_>, ctx: &VisitorContext) -> ControlFlow<()> {
        if let Node::JsxElement(element) = node
            && let JSXElementName::Ident(ident) = &element.opening.name
        {
            let name = ident.sym.as_ref();
            if name.chars().next().is_some_and(char::is_lowercase) {
                let (line, column) = ctx.span_to_location(element.span);
                self.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::SyntaxWarning,
                        Severity::Warning,
                        format!("{UPPERCASE_MESSAGE}: {name}"),
                        line,
                    )
                    .with_column(column)
                    .with_extra(Extra::Tag {
                        name: name.to_string(),
                    })
                    .with_suggestion(format!(
                        "Rename <{name}> to start with an uppercase letter if it is a component"
                    )),
                );
            }
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_syntax(code: &str) -> Vec<Diagnostic> {
        let file = ParsedFile::from_source("App.jsx", code);
        SyntaxPass::new().run(&file)
    }

    #[test]
    fn flags_lowercase_custom_component() {
        let diagnostics = run_syntax("const App = () => <myWidget />;");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::SyntaxWarning);
        assert_eq!(
            diagnostics[0].message,
            "Component names should start with uppercase: myWidget"
        );
        assert_eq!(diagnostics[0].line, 1);
    }

    #[test]
    fn flags_builtin_tags_too() {
        let diagnostics = run_syntax("const App = () => <div><span>hi</span></div>;");

        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.severity == Severity::Warning));
    }

    #[test]
    fn ignores_uppercase_and_member_tags() {
        let diagnostics = run_syntax("const App = () => <Layout><ui.Panel /></Layout>;");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn reports_in_document_order() {
        let code = "const App = () => (\n  <Card>\n    <header />\n    <footer />\n  </Card>\n);";

        let diagnostics = run_syntax(code);

        let lines: Vec<_> = diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![3, 4]);
    }

    #[test]
    fn parse_failure_yields_single_parse_error() {
        let diagnostics = run_syntax("import React from 'react';\nconst App = () => <div>;\n");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::ParseError);
        assert_eq!(diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn parse_failure_reports_line() {
        let diagnostics = run_syntax("const a = 1;\n\nconst = ;");

        assert_eq!(diagnostics[0].line, 3);
    }
}
