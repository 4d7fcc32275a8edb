//! The closed set of node kinds the walker reports to visitors.

use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    ArrowExpr, CallExpr, Constructor, Function, GetterProp, Ident, ImportDecl, SetterProp, JSXAttr, JSXClosingElement,
    JSXElement, JSXElementName, JSXExprContainer, JSXFragment, JSXOpeningElement, MemberExpr,
    SpreadElement,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    ImportDecl,
    Function,
    ArrowExpr,
    Constructor,
    GetterProp,
    SetterProp,
    CallExpr,
    MemberExpr,
    Ident,
    JsxElement,
    JsxOpeningElement,
    JsxClosingElement,
    JsxElementName,
    JsxAttr,
    JsxSpreadAttr,
    JsxExprContainer,
    JsxFragment,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::ImportDecl => "ImportDeclaration",
            NodeKind::Function => "Function",
            NodeKind::ArrowExpr => "ArrowFunctionExpression",
            NodeKind::Constructor => "Constructor",
            NodeKind::GetterProp => "GetterProperty",
            NodeKind::SetterProp => "SetterProperty",
            NodeKind::CallExpr => "CallExpression",
            NodeKind::MemberExpr => "MemberExpression",
            NodeKind::Ident => "Identifier",
            NodeKind::JsxElement => "JSXElement",
            NodeKind::JsxOpeningElement => "JSXOpeningElement",
            NodeKind::JsxClosingElement => "JSXClosingElement",
            NodeKind::JsxElementName => "JSXElementName",
            NodeKind::JsxAttr => "JSXAttribute",
            NodeKind::JsxSpreadAttr => "JSXSpreadAttribute",
            NodeKind::JsxExprContainer => "JSXExpressionContainer",
            NodeKind::JsxFragment => "JSXFragment",
        }
    }

    pub fn is_jsx(&self) -> bool {
        matches!(
            self,
            NodeKind::JsxElement
                | NodeKind::JsxOpeningElement
                | NodeKind::JsxClosingElement
                | NodeKind::JsxElementName
                | NodeKind::JsxAttr
                | NodeKind::JsxSpreadAttr
                | NodeKind::JsxExprContainer
                | NodeKind::JsxFragment
        )
    }

    /// Kinds that open a function body.
    pub fn is_function_like(&self) -> bool {
        matches!(
            self,
            NodeKind::Function
                | NodeKind::ArrowExpr
                | NodeKind::Constructor
                | NodeKind::GetterProp
                | NodeKind::SetterProp
        )
    }

    /// Child fields in the order the walker descends into them.
    pub fn child_fields(&self) -> &'static [&'static str] {
        match self {
            NodeKind::ImportDecl => &["specifiers", "src", "with"],
            NodeKind::Function => &["params", "decorators", "body", "type_params", "return_type"],
            NodeKind::ArrowExpr => &["params", "body", "type_params", "return_type"],
            NodeKind::Constructor => &["key", "params", "body"],
            NodeKind::GetterProp => &["key", "type_ann", "body"],
            NodeKind::SetterProp => &["key", "this_param", "param", "body"],
            NodeKind::CallExpr => &["callee", "args", "type_args"],
            NodeKind::MemberExpr => &["obj", "prop"],
            NodeKind::Ident => &[],
            NodeKind::JsxElement => &["opening", "children", "closing"],
            NodeKind::JsxOpeningElement => &["name", "attrs", "type_args"],
            NodeKind::JsxClosingElement => &["name"],
            NodeKind::JsxElementName => &["name"],
            NodeKind::JsxAttr => &["name", "value"],
            NodeKind::JsxSpreadAttr => &["expr"],
            NodeKind::JsxExprContainer => &["expr"],
            NodeKind::JsxFragment => &["opening", "children", "closing"],
        }
    }
}

/// A borrowed AST node tagged with its kind.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    ImportDecl(&'a ImportDecl),
    Function(&'a Function),
    ArrowExpr(&'a ArrowExpr),
    Constructor(&'a Constructor),
    GetterProp(&'a GetterProp),
    SetterProp(&'a SetterProp),
    CallExpr(&'a CallExpr),
    MemberExpr(&'a MemberExpr),
    Ident(&'a Ident),
    JsxElement(&'a JSXElement),
    JsxOpeningElement(&'a JSXOpeningElement),
    JsxClosingElement(&'a JSXClosingElement),
    JsxElementName(&'a JSXElementName),
    JsxAttr(&'a JSXAttr),
    JsxSpreadAttr(&'a SpreadElement),
    JsxExprContainer(&'a JSXExprContainer),
    JsxFragment(&'a JSXFragment),
}

impl Node<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::ImportDecl(_) => NodeKind::ImportDecl,
            Node::Function(_) => NodeKind::Function,
            Node::ArrowExpr(_) => NodeKind::ArrowExpr,
            Node::Constructor(_) => NodeKind::Constructor,
            Node::GetterProp(_) => NodeKind::GetterProp,
            Node::SetterProp(_) => NodeKind::SetterProp,
            Node::CallExpr(_) => NodeKind::CallExpr,
            Node::MemberExpr(_) => NodeKind::MemberExpr,
            Node::Ident(_) => NodeKind::Ident,
            Node::JsxElement(_) => NodeKind::JsxElement,
            Node::JsxOpeningElement(_) => NodeKind::JsxOpeningElement,
            Node::JsxClosingElement(_) => NodeKind::JsxClosingElement,
            Node::JsxElementName(_) => NodeKind::JsxElementName,
            Node::JsxAttr(_) => NodeKind::JsxAttr,
            Node::JsxSpreadAttr(_) => NodeKind::JsxSpreadAttr,
            Node::JsxExprContainer(_) => NodeKind::JsxExprContainer,
            Node::JsxFragment(_) => NodeKind::JsxFragment,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Node::ImportDecl(n) => n.span(),
            Node::Function(n) => n.span(),
            Node::ArrowExpr(n) => n.span(),
            Node::Constructor(n) => n.span(),
            Node::GetterProp(n) => n.span(),
            Node::SetterProp(n) => n.span(),
            Node::CallExpr(n) => n.span(),
            Node::MemberExpr(n) => n.span(),
            Node::Ident(n) => n.span(),
            Node::JsxElement(n) => n.span(),
            Node::JsxOpeningElement(n) => n.span(),
            Node::JsxClosingElement(n) => n.span(),
            Node::JsxElementName(n) => n.span(),
            Node::JsxAttr(n) => n.span(),
            Node::JsxSpreadAttr(n) => n.span(),
            Node::JsxExprContainer(n) => n.span(),
            Node::JsxFragment(n) => n.span(),
        }
    }
}
