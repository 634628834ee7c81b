//! Arena-allocated JSX node types.

use crate::ast::Expr;
use crate::span::Span;

/// JSX element: `<Tag attrs>children</Tag>` or `<Tag attrs />`.
#[derive(Debug, Clone, Copy)]
pub struct JsxElement<'a> {
    pub opening: JsxOpeningElement<'a>,
    pub children: &'a [JsxChild<'a>],
    /// `None` iff the element is self-closing.
    pub closing: Option<JsxClosingElement<'a>>,
    pub span: Span,
}

/// JSX fragment: `<>children</>`.
#[derive(Debug, Clone, Copy)]
pub struct JsxFragment<'a> {
    pub children: &'a [JsxChild<'a>],
    pub span: Span,
}

/// Opening tag of a JSX element.
#[derive(Debug, Clone, Copy)]
pub struct JsxOpeningElement<'a> {
    pub name: JsxName<'a>,
    pub attributes: &'a [JsxAttrItem<'a>],
    /// True iff the tag closes itself (`<br />`, `<Foo bar />`), with no
    /// matching closing tag.
    pub self_closing: bool,
    pub span: Span,
}

/// Closing tag of a JSX element.
#[derive(Debug, Clone, Copy)]
pub struct JsxClosingElement<'a> {
    pub name: JsxName<'a>,
    pub span: Span,
}

/// A JSX identifier with its location. Also used for attribute names, where
/// namespaced names (`xmlns:xlink`) keep the `:` inside `name`.
#[derive(Debug, Clone, Copy)]
pub struct JsxIdent<'a> {
    pub name: &'a str,
    pub span: Span,
}

/// JSX element name: `div`, `Foo`, or `Foo.Bar.Baz`.
#[derive(Debug, Clone, Copy)]
pub enum JsxName<'a> {
    Ident(JsxIdent<'a>),
    Member {
        object: &'a JsxName<'a>,
        property: JsxIdent<'a>,
        span: Span,
    },
}

impl JsxName<'_> {
    pub fn span(&self) -> Span {
        match self {
            JsxName::Ident(ident) => ident.span,
            JsxName::Member { span, .. } => *span,
        }
    }
}

/// One attribute slot in an opening tag.
#[derive(Debug, Clone, Copy)]
pub enum JsxAttrItem<'a> {
    Attribute(JsxAttribute<'a>),
    Spread(JsxSpreadAttribute<'a>),
}

/// Named attribute: `key="value"`, `onClick={handler}`, or bare `disabled`.
#[derive(Debug, Clone, Copy)]
pub struct JsxAttribute<'a> {
    pub name: JsxIdent<'a>,
    pub value: Option<JsxAttrValue<'a>>,
    pub span: Span,
}

/// Spread attribute: `{...props}`.
#[derive(Debug, Clone, Copy)]
pub struct JsxSpreadAttribute<'a> {
    pub argument: Expr<'a>,
    pub span: Span,
}

/// Attribute value forms.
#[derive(Debug, Clone, Copy)]
pub enum JsxAttrValue<'a> {
    /// String literal value; span includes the quotes.
    StringLit { value: &'a str, span: Span },
    Container(JsxExprContainer<'a>),
    Element(&'a JsxElement<'a>),
    Fragment(&'a JsxFragment<'a>),
}

/// Expression container: `{expr}`. `expr` is `None` for an empty container
/// (`{}` or `{/* comment */}`).
#[derive(Debug, Clone, Copy)]
pub struct JsxExprContainer<'a> {
    pub expr: Option<Expr<'a>>,
    pub span: Span,
}

/// Raw text between tags; `value` is the verbatim source slice.
#[derive(Debug, Clone, Copy)]
pub struct JsxText<'a> {
    pub value: &'a str,
    pub span: Span,
}

/// A child of an element or fragment.
#[derive(Debug, Clone, Copy)]
pub enum JsxChild<'a> {
    Element(&'a JsxElement<'a>),
    Fragment(&'a JsxFragment<'a>),
    Text(JsxText<'a>),
    Container(JsxExprContainer<'a>),
}
