//! AstVisitor trait for uniform AST traversal.

use std::ops::ControlFlow;

use super::context::VisitorContext;
use super::node::Node;

/// Receives every node of the closed [`Node`] set, `enter` in pre-order and
/// `leave` in the matching post-order.
pub trait AstVisitor {
    /// Returning `ControlFlow::Break` stops the whole walk; no further
    /// `enter` or `leave` calls are made.
    fn enter(&mut self, _node: Node<'_>, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn leave(&mut self, _node: Node<'_>, _ctx: &VisitorContext) {}
}
