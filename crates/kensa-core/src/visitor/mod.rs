//! Visitor pattern for AST traversal.
//!
//! [`walk_ast`] drives an [`AstVisitor`] over a module. Descent itself is
//! delegated to `swc_ecma_visit`, which is generated from the AST
//! definitions, so nodes nested anywhere (including inside JSX attributes,
//! children and spread attributes) are always reached.

mod context;
mod node;
mod traits;

pub use context::VisitorContext;
pub use node::{Node, NodeKind};
pub use traits::AstVisitor;

use std::ops::ControlFlow;

use swc_ecma_ast::{
    ArrowExpr, CallExpr, Constructor, Function, GetterProp, Ident, ImportDecl, JSXAttr,
    JSXAttrOrSpread, JSXClosingElement, JSXElement, JSXElementName, JSXExprContainer, JSXFragment,
    JSXOpeningElement, MemberExpr, Module, SetterProp,
};
use swc_ecma_visit::{Visit, VisitWith};

pub struct Walker<'a, V: AstVisitor> {
    visitor: &'a mut V,
    ctx: &'a VisitorContext<'a>,
    stopped: bool,
}

impl<V: AstVisitor> Walker<'_, V> {
    fn walk<N: VisitWith<Self>>(&mut self, node: Node<'_>, inner: &N) {
        if self.stopped {
            return;
        }
        if let ControlFlow::Break(()) = self.visitor.enter(node, self.ctx) {
            self.stopped = true;
            return;
        }
        inner.visit_children_with(self);
        if !self.stopped {
            self.visitor.leave(node, self.ctx);
        }
    }
}

impl<V: AstVisitor> Visit for Walker<'_, V> {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        self.walk(Node::ImportDecl(node), node);
    }

    fn visit_function(&mut self, node: &Function) {
        self.walk(Node::Function(node), node);
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.walk(Node::ArrowExpr(node), node);
    }

    fn visit_constructor(&mut self, node: &Constructor) {
        self.walk(Node::Constructor(node), node);
    }

    fn visit_getter_prop(&mut self, node: &GetterProp) {
        self.walk(Node::GetterProp(node), node);
    }

    fn visit_setter_prop(&mut self, node: &SetterProp) {
        self.walk(Node::SetterProp(node), node);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        self.walk(Node::CallExpr(node), node);
    }

    fn visit_member_expr(&mut self, node: &MemberExpr) {
        self.walk(Node::MemberExpr(node), node);
    }

    fn visit_ident(&mut self, node: &Ident) {
        self.walk(Node::Ident(node), node);
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        self.walk(Node::JsxElement(node), node);
    }

    fn visit_jsx_opening_element(&mut self, node: &JSXOpeningElement) {
        self.walk(Node::JsxOpeningElement(node), node);
    }

    fn visit_jsx_closing_element(&mut self, node: &JSXClosingElement) {
        self.walk(Node::JsxClosingElement(node), node);
    }

    fn visit_jsx_element_name(&mut self, node: &JSXElementName) {
        self.walk(Node::JsxElementName(node), node);
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        self.walk(Node::JsxAttr(node), node);
    }

    fn visit_jsx_attr_or_spread(&mut self, node: &JSXAttrOrSpread) {
        match node {
            JSXAttrOrSpread::SpreadElement(spread) => {
                self.walk(Node::JsxSpreadAttr(spread), spread)
            }
            JSXAttrOrSpread::JSXAttr(attr) => attr.visit_with(self),
        }
    }

    fn visit_jsx_expr_container(&mut self, node: &JSXExprContainer) {
        self.walk(Node::JsxExprContainer(node), node);
    }

    fn visit_jsx_fragment(&mut self, node: &JSXFragment) {
        self.walk(Node::JsxFragment(node), node);
    }
}

pub fn walk_ast<V: AstVisitor>(module: &Module, visitor: &mut V, ctx: &VisitorContext) {
    walk_node(module, visitor, ctx);
}

/// Walks any subtree, e.g. a single callback body.
pub fn walk_node<'a, N, V>(node: &N, visitor: &'a mut V, ctx: &'a VisitorContext<'a>)
where
    V: AstVisitor,
    N: VisitWith<Walker<'a, V>>,
{
    let mut walker = Walker {
        visitor,
        ctx,
        stopped: false,
    };
    node.visit_with(&mut walker);
}
