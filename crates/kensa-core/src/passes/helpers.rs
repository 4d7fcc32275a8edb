//! Shared helper functions for pass implementations.

use swc_common::Spanned;
use swc_ecma_ast::{
    ArrayLit, CallExpr, Callee, Expr, Ident, JSXAttrName, JSXAttrOrSpread, JSXElementName,
    JSXObject, JSXOpeningElement, MemberProp,
};

use crate::visitor::VisitorContext;

/// Hooks that register side effects and take a dependency array.
pub const EFFECT_HOOKS: &[&str] = &["useEffect", "useLayoutEffect"];

/// Hook naming convention: `use` alone or followed by an uppercase letter.
pub fn is_hook_name(name: &str) -> bool {
    has_prefix_then_uppercase(name, "use") || name == "use"
}

/// State setter naming convention: anything longer than `set` that starts with it.
pub fn is_setter_name(name: &str) -> bool {
    name.len() > "set".len() && name.starts_with("set")
}

fn has_prefix_then_uppercase(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// The identifier of a bare `name(...)` call.
pub fn callee_ident(call: &CallExpr) -> Option<&Ident> {
    match &call.callee {
        Callee::Expr(expr) => expr.as_ident(),
        _ => None,
    }
}

/// The property name of a `obj.name(...)` call.
pub fn callee_member_prop(call: &CallExpr) -> Option<&str> {
    let Callee::Expr(expr) = &call.callee else {
        return None;
    };
    let Expr::Member(member) = expr.as_ref() else {
        return None;
    };
    match &member.prop {
        MemberProp::Ident(prop) => Some(prop.sym.as_ref()),
        _ => None,
    }
}

/// The `n`-th call argument when it is an array literal.
pub fn array_arg(call: &CallExpr, n: usize) -> Option<&ArrayLit> {
    let arg = call.args.get(n)?;
    if arg.spread.is_some() {
        return None;
    }
    match arg.expr.as_ref() {
        Expr::Array(array) => Some(array),
        _ => None,
    }
}

/// Tag name as written in the source: `div`, `Foo.Bar`, `svg:rect`.
pub fn element_name_text(name: &JSXElementName, ctx: &VisitorContext) -> String {
    match name {
        JSXElementName::Ident(ident) => ident.sym.to_string(),
        other => ctx
            .get_source_text(other.span())
            .unwrap_or_default()
            .to_string(),
    }
}

/// The identifier a tag name resolves through: `Foo` for both `<Foo>` and
/// `<Foo.Bar.Baz>`. Namespaced tags reference no binding.
pub fn element_root_ident(name: &JSXElementName) -> Option<&Ident> {
    match name {
        JSXElementName::Ident(ident) => Some(ident),
        JSXElementName::JSXMemberExpr(member) => {
            let mut object = &member.obj;
            loop {
                match object {
                    JSXObject::Ident(ident) => return Some(ident),
                    JSXObject::JSXMemberExpr(inner) => object = &inner.obj,
                }
            }
        }
        JSXElementName::JSXNamespacedName(_) => None,
    }
}

pub fn has_attr(opening: &JSXOpeningElement, attr_name: &str) -> bool {
    opening.attrs.iter().any(|attr| match attr {
        JSXAttrOrSpread::JSXAttr(attr) => {
            matches!(&attr.name, JSXAttrName::Ident(name) if name.sym.as_ref() == attr_name)
        }
        JSXAttrOrSpread::SpreadElement(_) => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_names_follow_use_convention() {
        assert!(is_hook_name("useState"));
        assert!(is_hook_name("useEffect"));
        assert!(is_hook_name("use"));
        assert!(!is_hook_name("user"));
        assert!(!is_hook_name("useless"));
        assert!(!is_hook_name("fetchUser"));
    }

    #[test]
    fn setter_names_follow_set_convention() {
        assert!(is_setter_name("setCount"));
        assert!(is_setter_name("setTimeout"));
        assert!(is_setter_name("settings"));
        assert!(is_setter_name("set_value"));
        assert!(!is_setter_name("set"));
    }
}
