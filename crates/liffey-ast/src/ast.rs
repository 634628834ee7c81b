//! Arena-allocated AST node types for JavaScript.
//!
//! All nodes are allocated in a bump arena; child lists are frozen arena
//! slices and references are plain `&'a T`. Nothing here points back at its
//! parent, so the tree is a strict DAG rooted at [`Program`].
//!
//! JSX and TypeScript node types live in their own modules (`jsx`,
//! `typescript`); their constructs hang off [`ExprKind`] and [`StmtKind`]
//! here.

use crate::jsx::{JsxElement, JsxFragment};
use crate::span::Span;
use crate::typescript::{
    TsEnum, TsInterface, TsType, TsTypeAlias, TsTypeAnnotation, TsTypeParamDecl,
};

/// The root node for a parsed module or script.
///
/// `span` covers the whole source, `[0, len)`, even when the body is empty.
#[derive(Debug, Clone, Copy)]
pub struct Program<'a> {
    pub body: &'a [Stmt<'a>],
    pub span: Span,
}

impl<'a> Program<'a> {
    pub fn new(body: &'a [Stmt<'a>], span: Span) -> Self {
        Self { body, span }
    }
}

// =============================================================================
// Statements
// =============================================================================

/// A statement node.
#[derive(Debug, Clone, Copy)]
pub struct Stmt<'a> {
    pub kind: StmtKind<'a>,
    pub span: Span,
}

impl<'a> Stmt<'a> {
    pub fn new(kind: StmtKind<'a>, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Statement kinds.
#[derive(Debug, Clone, Copy)]
pub enum StmtKind<'a> {
    // === Declarations ===
    Var {
        kind: VarKind,
        decls: &'a [VarDeclarator<'a>],
    },
    Function(&'a Function<'a>),
    Class(&'a Class<'a>),
    TsTypeAlias(&'a TsTypeAlias<'a>),
    TsInterface(&'a TsInterface<'a>),
    TsEnum(&'a TsEnum<'a>),

    // === Control flow ===
    Block(&'a [Stmt<'a>]),
    If {
        test: Expr<'a>,
        consequent: &'a Stmt<'a>,
        alternate: Option<&'a Stmt<'a>>,
    },
    Switch {
        discriminant: Expr<'a>,
        cases: &'a [SwitchCase<'a>],
    },
    For {
        init: Option<ForInit<'a>>,
        test: Option<Expr<'a>>,
        update: Option<Expr<'a>>,
        body: &'a Stmt<'a>,
    },
    ForIn {
        left: ForHead<'a>,
        right: Expr<'a>,
        body: &'a Stmt<'a>,
    },
    ForOf {
        left: ForHead<'a>,
        right: Expr<'a>,
        body: &'a Stmt<'a>,
        is_await: bool,
    },
    While {
        test: Expr<'a>,
        body: &'a Stmt<'a>,
    },
    DoWhile {
        body: &'a Stmt<'a>,
        test: Expr<'a>,
    },
    Break {
        label: Option<&'a str>,
    },
    Continue {
        label: Option<&'a str>,
    },
    Return {
        arg: Option<Expr<'a>>,
    },
    Throw {
        arg: Expr<'a>,
    },
    Try {
        block: &'a Stmt<'a>,
        handler: Option<&'a CatchClause<'a>>,
        finalizer: Option<&'a Stmt<'a>>,
    },
    Labeled {
        label: &'a str,
        body: &'a Stmt<'a>,
    },

    // === Simple ===
    Expr(Expr<'a>),
    Empty,
    Debugger,
    With {
        object: Expr<'a>,
        body: &'a Stmt<'a>,
    },

    // === Modules ===
    Import(&'a ImportDecl<'a>),
    Export(&'a ExportDecl<'a>),
}

// =============================================================================
// Expressions
// =============================================================================

/// An expression node.
#[derive(Debug, Clone, Copy)]
pub struct Expr<'a> {
    pub kind: ExprKind<'a>,
    pub span: Span,
}

impl<'a> Expr<'a> {
    pub fn new(kind: ExprKind<'a>, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Expression kinds.
#[derive(Debug, Clone, Copy)]
pub enum ExprKind<'a> {
    Ident(&'a str),
    This,
    Super,
    Literal(Lit<'a>),
    /// Template literal. `quasis` holds the cooked string parts; for a
    /// template with no substitutions there is one quasi and no exprs.
    Template {
        quasis: &'a [&'a str],
        exprs: &'a [Expr<'a>],
    },

    Array(&'a [Option<Expr<'a>>]),
    Object(&'a [Property<'a>]),
    Function(&'a Function<'a>),
    Arrow(&'a ArrowFunction<'a>),
    Class(&'a Class<'a>),

    Unary {
        op: UnaryOp,
        arg: &'a Expr<'a>,
    },
    Update {
        op: UpdateOp,
        prefix: bool,
        arg: &'a Expr<'a>,
    },
    Binary {
        op: BinaryOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Logical {
        op: LogicalOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Assign {
        op: AssignOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Conditional {
        test: &'a Expr<'a>,
        consequent: &'a Expr<'a>,
        alternate: &'a Expr<'a>,
    },
    Sequence(&'a [Expr<'a>]),

    Member {
        object: &'a Expr<'a>,
        property: &'a Expr<'a>,
        computed: bool,
        optional: bool,
    },
    Call {
        callee: &'a Expr<'a>,
        args: &'a [Expr<'a>],
        optional: bool,
    },
    New {
        callee: &'a Expr<'a>,
        args: &'a [Expr<'a>],
    },
    TaggedTemplate {
        tag: &'a Expr<'a>,
        quasi: &'a Expr<'a>,
    },

    Spread(&'a Expr<'a>),
    Yield {
        arg: Option<&'a Expr<'a>>,
        delegate: bool,
    },
    Await(&'a Expr<'a>),

    // === JSX ===
    JsxElement(&'a JsxElement<'a>),
    JsxFragment(&'a JsxFragment<'a>),

    // === TypeScript ===
    TsAs {
        expr: &'a Expr<'a>,
        type_ann: &'a TsType<'a>,
    },
}

/// Literal values.
#[derive(Debug, Clone, Copy)]
pub enum Lit<'a> {
    Null,
    Bool(bool),
    Number(f64),
    String(&'a str),
    BigInt(&'a str),
    Regex { pattern: &'a str, flags: &'a str },
}

// =============================================================================
// Bindings (patterns)
// =============================================================================

/// A binding pattern: the target of a declaration, parameter, or catch param.
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    pub kind: BindingKind<'a>,
    pub span: Span,
}

impl<'a> Binding<'a> {
    pub fn new(kind: BindingKind<'a>, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Binding pattern kinds.
#[derive(Debug, Clone, Copy)]
pub enum BindingKind<'a> {
    Ident { name: &'a str },
    Array { elements: &'a [Option<ArrayPatternElement<'a>>] },
    Object { properties: &'a [ObjectPatternProperty<'a>] },
}

/// Element in an array pattern.
#[derive(Debug, Clone, Copy)]
pub struct ArrayPatternElement<'a> {
    pub binding: Binding<'a>,
    pub default: Option<Expr<'a>>,
    pub rest: bool,
}

/// Property in an object pattern.
#[derive(Debug, Clone, Copy)]
pub struct ObjectPatternProperty<'a> {
    pub key: &'a str,
    pub value: Binding<'a>,
    pub default: Option<Expr<'a>>,
    pub shorthand: bool,
    pub rest: bool,
}

// =============================================================================
// Supporting types
// =============================================================================

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Minus, Plus, Not, BitNot, Typeof, Void, Delete,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add, Sub, Mul, Div, Mod, Pow,
    Eq, NotEq, StrictEq, StrictNotEq, Lt, LtEq, Gt, GtEq,
    BitOr, BitXor, BitAnd, Shl, Shr, UShr,
    In, Instanceof,
}

/// Logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And, Or, NullishCoalesce,
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign, AddAssign, SubAssign, MulAssign, DivAssign, ModAssign, PowAssign,
    ShlAssign, ShrAssign, UShrAssign,
    BitOrAssign, BitXorAssign, BitAndAssign,
    AndAssign, OrAssign, NullishAssign,
}

/// Update operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    Increment, Decrement,
}

/// Variable declaration kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Var, Let, Const,
}

impl VarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

/// One declarator in a variable declaration: `x: T = init`.
#[derive(Debug, Clone, Copy)]
pub struct VarDeclarator<'a> {
    pub binding: Binding<'a>,
    pub type_ann: Option<&'a TsTypeAnnotation<'a>>,
    pub init: Option<Expr<'a>>,
    pub span: Span,
}

/// Object literal property.
#[derive(Debug, Clone, Copy)]
pub struct Property<'a> {
    pub key: Expr<'a>,
    pub value: Expr<'a>,
    pub kind: PropertyKind,
    pub shorthand: bool,
    pub computed: bool,
    pub span: Span,
}

/// Object literal property kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Init, Get, Set, Method,
}

/// Switch case.
#[derive(Debug, Clone, Copy)]
pub struct SwitchCase<'a> {
    /// `None` for the `default:` case.
    pub test: Option<Expr<'a>>,
    pub consequent: &'a [Stmt<'a>],
    pub span: Span,
}

/// Catch clause. `param` is `None` for `catch {}`.
#[derive(Debug, Clone, Copy)]
pub struct CatchClause<'a> {
    pub param: Option<Binding<'a>>,
    pub body: &'a Stmt<'a>,
    pub span: Span,
}

/// For loop initializer.
#[derive(Debug, Clone, Copy)]
pub enum ForInit<'a> {
    /// A `var`/`let`/`const` declaration; the statement kind is always `Var`.
    Var(&'a Stmt<'a>),
    Expr(Expr<'a>),
}

/// Left-hand side of for-in / for-of.
#[derive(Debug, Clone, Copy)]
pub enum ForHead<'a> {
    /// A fresh declaration: `for (const x of ...)`.
    Var(&'a Stmt<'a>),
    /// An existing target: `for (x of ...)`, `for ([a, b] of ...)`.
    Pattern(Binding<'a>),
}

// =============================================================================
// Functions and classes
// =============================================================================

/// Function node, shared by declarations, expressions, and methods.
#[derive(Debug, Clone, Copy)]
pub struct Function<'a> {
    pub name: Option<&'a str>,
    pub type_params: Option<&'a TsTypeParamDecl<'a>>,
    pub params: &'a [Param<'a>],
    pub return_type: Option<&'a TsTypeAnnotation<'a>>,
    /// Always a block statement when present; `None` for overload/ambient
    /// signatures.
    pub body: Option<&'a Stmt<'a>>,
    pub is_async: bool,
    pub is_generator: bool,
    pub span: Span,
}

/// Arrow function node.
#[derive(Debug, Clone, Copy)]
pub struct ArrowFunction<'a> {
    pub params: &'a [Param<'a>],
    pub return_type: Option<&'a TsTypeAnnotation<'a>>,
    pub body: ArrowBody<'a>,
    pub is_async: bool,
    pub span: Span,
}

/// Arrow function body.
#[derive(Debug, Clone, Copy)]
pub enum ArrowBody<'a> {
    Expr(&'a Expr<'a>),
    /// Always a block statement.
    Block(&'a Stmt<'a>),
}

/// Function parameter.
#[derive(Debug, Clone, Copy)]
pub struct Param<'a> {
    pub binding: Binding<'a>,
    pub type_ann: Option<&'a TsTypeAnnotation<'a>>,
    pub default: Option<Expr<'a>>,
    pub rest: bool,
    pub optional: bool,
    pub span: Span,
}

/// Class node, shared by declarations and expressions.
#[derive(Debug, Clone, Copy)]
pub struct Class<'a> {
    pub name: Option<&'a str>,
    pub type_params: Option<&'a TsTypeParamDecl<'a>>,
    pub super_class: Option<&'a Expr<'a>>,
    pub body: &'a ClassBody<'a>,
    pub span: Span,
}

/// Class body: the `{ ... }` member list with its own span.
#[derive(Debug, Clone, Copy)]
pub struct ClassBody<'a> {
    pub members: &'a [ClassMember<'a>],
    pub span: Span,
}

/// Class member.
#[derive(Debug, Clone, Copy)]
pub struct ClassMember<'a> {
    pub kind: ClassMemberKind<'a>,
    pub span: Span,
}

/// Class member kinds.
#[derive(Debug, Clone, Copy)]
pub enum ClassMemberKind<'a> {
    Method {
        key: Expr<'a>,
        value: &'a Function<'a>,
        kind: MethodKind,
        computed: bool,
        is_static: bool,
    },
    Property {
        key: Expr<'a>,
        type_ann: Option<&'a TsTypeAnnotation<'a>>,
        value: Option<Expr<'a>>,
        computed: bool,
        is_static: bool,
    },
    StaticBlock(&'a [Stmt<'a>]),
}

/// Method kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method, Get, Set, Constructor,
}

// =============================================================================
// Modules
// =============================================================================

/// Import declaration.
#[derive(Debug, Clone, Copy)]
pub struct ImportDecl<'a> {
    pub specifiers: &'a [ImportSpecifier<'a>],
    pub source: &'a str,
    pub span: Span,
}

/// Import specifier.
#[derive(Debug, Clone, Copy)]
pub enum ImportSpecifier<'a> {
    /// `import foo from "mod"`
    Default { local: &'a str, span: Span },
    /// `import * as foo from "mod"`
    Namespace { local: &'a str, span: Span },
    /// `import { a as b } from "mod"`
    Named { imported: &'a str, local: &'a str, span: Span },
}

impl ImportSpecifier<'_> {
    pub fn span(&self) -> Span {
        match self {
            ImportSpecifier::Default { span, .. }
            | ImportSpecifier::Namespace { span, .. }
            | ImportSpecifier::Named { span, .. } => *span,
        }
    }

    /// Local binding name introduced by this specifier.
    pub fn local(&self) -> &str {
        match self {
            ImportSpecifier::Default { local, .. }
            | ImportSpecifier::Namespace { local, .. }
            | ImportSpecifier::Named { local, .. } => local,
        }
    }
}

/// Export declaration.
#[derive(Debug, Clone, Copy)]
pub enum ExportDecl<'a> {
    /// `export { a, b as c }` or `export const x = 1`
    Named {
        decl: Option<&'a Stmt<'a>>,
        specifiers: &'a [ExportSpecifier<'a>],
        source: Option<&'a str>,
    },
    /// `export default ...`
    Default(ExportDefault<'a>),
    /// `export * from "mod"` / `export * as ns from "mod"`
    All {
        exported: Option<&'a str>,
        source: &'a str,
    },
}

/// Payload of `export default`.
#[derive(Debug, Clone, Copy)]
pub enum ExportDefault<'a> {
    /// `export default function f() {}` / `export default class C {}`
    Decl(&'a Stmt<'a>),
    /// `export default expr;`
    Expr(Expr<'a>),
}

/// Export specifier: `local as exported`.
#[derive(Debug, Clone, Copy)]
pub struct ExportSpecifier<'a> {
    pub local: &'a str,
    pub exported: &'a str,
    pub span: Span,
}
