//! Accessibility pass.

use std::ops::ControlFlow;

use swc_ecma_ast::JSXOpeningElement;

use crate::declare_pass;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Extra, Severity, sort_by_location};
use crate::parser::ParsedFile;
use crate::passes::helpers::{element_name_text, has_attr};
use crate::passes::{Pass, PassMetadata};
use crate::visitor::{AstVisitor, Node, VisitorContext, walk_ast};

const INTERACTIVE_TAGS: &[&str] = &["button", "a", "input", "select"];

declare_pass!(
    AccessibilityPass,
    name = Accessibility,
    description = "Flags images without alt text and click handlers on static elements"
);

impl Pass for AccessibilityPass {
    type Output = Vec<Diagnostic>;

    fn metadata(&self) -> &PassMetadata {
        &self.metadata
    }

    fn run(&self, file: &ParsedFile) -> Vec<Diagnostic> {
        let Some(module) = file.module() else {
            return Vec::new();
        };

        let ctx = VisitorContext::new(file);
        let mut visitor = AccessibilityVisitor {
            diagnostics: Vec::new(),
        };
        walk_ast(module, &mut visitor, &ctx);

        sort_by_location(&mut visitor.diagnostics);
        visitor.diagnostics
    }
}

struct AccessibilityVisitor {
    diagnostics: Vec<Diagnostic>,
}

impl AccessibilityVisitor {
    fn check(&mut self, opening: &JSXOpeningElement, ctx: &VisitorContext) {
        let tag = element_name_text(&opening.name, ctx);
        let (line, column) = ctx.span_to_location(opening.span);

        if tag == "img" && !has_attr(opening, "alt") {
            self.diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::AccessibilityIssue,
                    Severity::Error,
                    "Image elements must have alt text",
                    line,
                )
                .with_column(column)
                .with_extra(Extra::Tag { name: tag.clone() })
                .with_suggestion("Add an alt attribute describing the image, or alt=\"\" if decorative"),
            );
        }

        if has_attr(opening, "onClick") && !INTERACTIVE_TAGS.contains(&tag.as_str()) {
            self.diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::AccessibilityIssue,
                    Severity::Warning,
                    format!("onClick handler on non-interactive element: {tag}"),
                    line,
                )
                .with_column(column)
                .with_suggestion("Use a <button>, or add role and keyboard handlers")
                .with_extra(Extra::Tag { name: tag }),
            );
        }
    }
}

impl AstVisitor for AccessibilityVisitor {
    fn enter(&mut self, node: Node<'_>, ctx: &VisitorContext) -> ControlFlow<()> {
        if let Node::JsxOpeningElement(opening) = node {
            self.check(opening, ctx);
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_accessibility(code: &str) -> Vec<Diagnostic> {
        let file = ParsedFile::from_source("App.jsx", code);
        AccessibilityPass::new().run(&file)
    }

    #[test]
    fn image_without_alt_is_one_error() {
        let diagnostics = run_accessibility("const App = () => <img src=\"x.png\" />;");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::AccessibilityIssue);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].message, "Image elements must have alt text");
    }

    #[test]
    fn image_with_alt_is_clean() {
        let diagnostics = run_accessibility("const App = () => <img src=\"x.png\" alt=\"logo\" />;");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn empty_alt_counts_as_present() {
        let diagnostics = run_accessibility("const App = () => <img src=\"x.png\" alt=\"\" />;");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn click_on_div_is_a_warning() {
        let diagnostics = run_accessibility("const App = () => <div onClick={open}>Open</div>;");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(
            diagnostics[0].message,
            "onClick handler on non-interactive element: div"
        );
    }

    #[test]
    fn click_on_interactive_tags_is_fine() {
        let diagnostics = run_accessibility(
            r#"
const App = () => (
  <form>
    <button onClick={save}>Save</button>
    <a href="/" onClick={nav}>Home</a>
    <input onClick={focus} />
    <select onClick={pick} />
  </form>
);
"#,
        );

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn click_on_component_uses_full_tag_name() {
        let diagnostics = run_accessibility("const App = () => <ui.Card onClick={open} />;");

        assert_eq!(
            diagnostics[0].message,
            "onClick handler on non-interactive element: ui.Card"
        );
    }

    #[test]
    fn spread_attributes_do_not_count_as_alt() {
        let diagnostics = run_accessibility("const App = (p) => <img {...p} />;");

        assert_eq!(diagnostics.len(), 1);
    }
}
