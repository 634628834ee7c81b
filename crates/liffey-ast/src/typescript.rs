//! Arena-allocated TypeScript type-system node types.
//!
//! Only the syntax needed to materialize type positions in the tree: the
//! type checker's view of these constructs is out of scope.

use crate::ast::{Expr, Lit, Param};
use crate::span::Span;

/// A type in a type position.
#[derive(Debug, Clone, Copy)]
pub struct TsType<'a> {
    pub kind: TsTypeKind<'a>,
    pub span: Span,
}

impl<'a> TsType<'a> {
    pub fn new(kind: TsTypeKind<'a>, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Type kinds.
#[derive(Debug, Clone, Copy)]
pub enum TsTypeKind<'a> {
    /// `Foo`, `a.b.Foo<T>`, and keyword types (`number`, `string`, ...).
    /// Qualified names keep their dots inside `name`.
    Ref {
        name: &'a str,
        type_args: &'a [TsType<'a>],
    },
    /// `A | B | C`
    Union(&'a [TsType<'a>]),
    /// `A & B & C`
    Intersection(&'a [TsType<'a>]),
    /// `T[]`
    Array(&'a TsType<'a>),
    /// `'lit'`, `42`, `true` in a type position.
    Lit(Lit<'a>),
    /// `(a: T) => U`
    Fn {
        params: &'a [Param<'a>],
        return_type: &'a TsType<'a>,
    },
}

/// Type annotation, spanning from the `:` through the type.
#[derive(Debug, Clone, Copy)]
pub struct TsTypeAnnotation<'a> {
    pub type_ann: TsType<'a>,
    pub span: Span,
}

/// `type Name<T> = ...`
#[derive(Debug, Clone, Copy)]
pub struct TsTypeAlias<'a> {
    pub name: &'a str,
    pub type_params: Option<&'a TsTypeParamDecl<'a>>,
    pub type_ann: TsType<'a>,
}

/// `interface Name<T> extends A, B { ... }`
#[derive(Debug, Clone, Copy)]
pub struct TsInterface<'a> {
    pub name: &'a str,
    pub type_params: Option<&'a TsTypeParamDecl<'a>>,
    pub extends: &'a [TsType<'a>],
    pub body: TsInterfaceBody<'a>,
}

/// Interface body: the `{ ... }` member list with its own span.
#[derive(Debug, Clone, Copy)]
pub struct TsInterfaceBody<'a> {
    pub members: &'a [TsSignature<'a>],
    pub span: Span,
}

/// A member signature in an interface body.
#[derive(Debug, Clone, Copy)]
pub struct TsSignature<'a> {
    pub kind: TsSignatureKind<'a>,
    pub span: Span,
}

/// Signature kinds.
#[derive(Debug, Clone, Copy)]
pub enum TsSignatureKind<'a> {
    /// `name?: T` / `readonly name: T`
    Property {
        key: &'a str,
        optional: bool,
        readonly: bool,
        type_ann: Option<&'a TsTypeAnnotation<'a>>,
    },
    /// `name?(params): T`
    Method {
        key: &'a str,
        optional: bool,
        params: &'a [Param<'a>],
        return_type: Option<&'a TsTypeAnnotation<'a>>,
    },
}

/// `enum Name { ... }` / `const enum Name { ... }`
#[derive(Debug, Clone, Copy)]
pub struct TsEnum<'a> {
    pub name: &'a str,
    pub is_const: bool,
    pub members: &'a [TsEnumMember<'a>],
}

/// One enum member, with an optional initializer.
#[derive(Debug, Clone, Copy)]
pub struct TsEnumMember<'a> {
    pub name: &'a str,
    pub init: Option<Expr<'a>>,
    pub span: Span,
}

/// Declaration-site type parameter list: `<T, U extends V = W>`.
#[derive(Debug, Clone, Copy)]
pub struct TsTypeParamDecl<'a> {
    pub params: &'a [TsTypeParam<'a>],
    pub span: Span,
}

/// One declaration-site type parameter.
#[derive(Debug, Clone, Copy)]
pub struct TsTypeParam<'a> {
    pub name: &'a str,
    pub constraint: Option<TsType<'a>>,
    pub default: Option<TsType<'a>>,
    pub span: Span,
}
