//! Uniform node view over the tree.
//!
//! [`Node`] is a cheap `Copy` reference into the arena that gives every
//! variant the same capability set: a constant type tag, a span, zero-copy
//! text extraction, and line-range lookup. The tag strings follow the
//! ESTree / typescript-eslint naming so downstream tools can dispatch on
//! them by value.

use crate::ast::*;
use crate::jsx::*;
use crate::span::{LineIndex, Span};
use crate::typescript::*;

/// A reference to any node in the tree.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program<'a>),
    Stmt(&'a Stmt<'a>),
    Expr(&'a Expr<'a>),

    VarDeclarator(&'a VarDeclarator<'a>),
    Binding(&'a Binding<'a>),
    Param(&'a Param<'a>),
    Property(&'a Property<'a>),
    /// A bare function used as a method value; tags as `FunctionExpression`.
    Function(&'a Function<'a>),
    ClassBody(&'a ClassBody<'a>),
    ClassMember(&'a ClassMember<'a>),
    SwitchCase(&'a SwitchCase<'a>),
    CatchClause(&'a CatchClause<'a>),
    ImportSpecifier(&'a ImportSpecifier<'a>),
    ExportSpecifier(&'a ExportSpecifier<'a>),

    JsxElement(&'a JsxElement<'a>),
    JsxFragment(&'a JsxFragment<'a>),
    JsxOpeningElement(&'a JsxOpeningElement<'a>),
    JsxClosingElement(&'a JsxClosingElement<'a>),
    JsxName(&'a JsxName<'a>),
    JsxIdent(&'a JsxIdent<'a>),
    JsxAttribute(&'a JsxAttribute<'a>),
    JsxSpreadAttribute(&'a JsxSpreadAttribute<'a>),
    JsxText(&'a JsxText<'a>),
    JsxExprContainer(&'a JsxExprContainer<'a>),

    TsType(&'a TsType<'a>),
    TsTypeAnnotation(&'a TsTypeAnnotation<'a>),
    TsTypeParamDecl(&'a TsTypeParamDecl<'a>),
    TsTypeParam(&'a TsTypeParam<'a>),
    TsInterfaceBody(&'a TsInterfaceBody<'a>),
    TsSignature(&'a TsSignature<'a>),
    TsEnumMember(&'a TsEnumMember<'a>),
}

impl<'a> Node<'a> {
    /// Constant string discriminator for this node, ESTree-style.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Program(_) => "Program",
            Node::Stmt(stmt) => match &stmt.kind {
                StmtKind::Var { .. } => "VariableDeclaration",
                StmtKind::Function(_) => "FunctionDeclaration",
                StmtKind::Class(_) => "ClassDeclaration",
                StmtKind::TsTypeAlias(_) => "TSTypeAliasDeclaration",
                StmtKind::TsInterface(_) => "TSInterfaceDeclaration",
                StmtKind::TsEnum(_) => "TSEnumDeclaration",
                StmtKind::Block(_) => "BlockStatement",
                StmtKind::If { .. } => "IfStatement",
                StmtKind::Switch { .. } => "SwitchStatement",
                StmtKind::For { .. } => "ForStatement",
                StmtKind::ForIn { .. } => "ForInStatement",
                StmtKind::ForOf { .. } => "ForOfStatement",
                StmtKind::While { .. } => "WhileStatement",
                StmtKind::DoWhile { .. } => "DoWhileStatement",
                StmtKind::Break { .. } => "BreakStatement",
                StmtKind::Continue { .. } => "ContinueStatement",
                StmtKind::Return { .. } => "ReturnStatement",
                StmtKind::Throw { .. } => "ThrowStatement",
                StmtKind::Try { .. } => "TryStatement",
                StmtKind::Labeled { .. } => "LabeledStatement",
                StmtKind::Expr(_) => "ExpressionStatement",
                StmtKind::Empty => "EmptyStatement",
                StmtKind::Debugger => "DebuggerStatement",
                StmtKind::With { .. } => "WithStatement",
                StmtKind::Import(_) => "ImportDeclaration",
                StmtKind::Export(decl) => match decl {
                    ExportDecl::Named { .. } => "ExportNamedDeclaration",
                    ExportDecl::Default(_) => "ExportDefaultDeclaration",
                    ExportDecl::All { .. } => "ExportAllDeclaration",
                },
            },
            Node::Expr(expr) => match &expr.kind {
                ExprKind::Ident(_) => "Identifier",
                ExprKind::This => "ThisExpression",
                ExprKind::Super => "Super",
                ExprKind::Literal(_) => "Literal",
                ExprKind::Template { .. } => "TemplateLiteral",
                ExprKind::Array(_) => "ArrayExpression",
                ExprKind::Object(_) => "ObjectExpression",
                ExprKind::Function(_) => "FunctionExpression",
                ExprKind::Arrow(_) => "ArrowFunctionExpression",
                ExprKind::Class(_) => "ClassExpression",
                ExprKind::Unary { .. } => "UnaryExpression",
                ExprKind::Update { .. } => "UpdateExpression",
                ExprKind::Binary { .. } => "BinaryExpression",
                ExprKind::Logical { .. } => "LogicalExpression",
                ExprKind::Assign { .. } => "AssignmentExpression",
                ExprKind::Conditional { .. } => "ConditionalExpression",
                ExprKind::Sequence(_) => "SequenceExpression",
                ExprKind::Member { .. } => "MemberExpression",
                ExprKind::Call { .. } => "CallExpression",
                ExprKind::New { .. } => "NewExpression",
                ExprKind::TaggedTemplate { .. } => "TaggedTemplateExpression",
                ExprKind::Spread(_) => "SpreadElement",
                ExprKind::Yield { .. } => "YieldExpression",
                ExprKind::Await(_) => "AwaitExpression",
                ExprKind::JsxElement(_) => "JSXElement",
                ExprKind::JsxFragment(_) => "JSXFragment",
                ExprKind::TsAs { .. } => "TSAsExpression",
            },
            Node::VarDeclarator(_) => "VariableDeclarator",
            Node::Binding(binding) => match binding.kind {
                BindingKind::Ident { .. } => "Identifier",
                BindingKind::Array { .. } => "ArrayPattern",
                BindingKind::Object { .. } => "ObjectPattern",
            },
            Node::Param(_) => "FormalParameter",
            Node::Property(_) => "Property",
            Node::Function(_) => "FunctionExpression",
            Node::ClassBody(_) => "ClassBody",
            Node::ClassMember(member) => match member.kind {
                ClassMemberKind::Method { .. } => "MethodDefinition",
                ClassMemberKind::Property { .. } => "PropertyDefinition",
                ClassMemberKind::StaticBlock(_) => "StaticBlock",
            },
            Node::SwitchCase(_) => "SwitchCase",
            Node::CatchClause(_) => "CatchClause",
            Node::ImportSpecifier(spec) => match spec {
                ImportSpecifier::Named { .. } => "ImportSpecifier",
                ImportSpecifier::Default { .. } => "ImportDefaultSpecifier",
                ImportSpecifier::Namespace { .. } => "ImportNamespaceSpecifier",
            },
            Node::ExportSpecifier(_) => "ExportSpecifier",
            Node::JsxElement(_) => "JSXElement",
            Node::JsxFragment(_) => "JSXFragment",
            Node::JsxOpeningElement(_) => "JSXOpeningElement",
            Node::JsxClosingElement(_) => "JSXClosingElement",
            Node::JsxName(name) => match name {
                JsxName::Ident(_) => "JSXIdentifier",
                JsxName::Member { .. } => "JSXMemberExpression",
            },
            Node::JsxIdent(_) => "JSXIdentifier",
            Node::JsxAttribute(_) => "JSXAttribute",
            Node::JsxSpreadAttribute(_) => "JSXSpreadAttribute",
            Node::JsxText(_) => "JSXText",
            Node::JsxExprContainer(_) => "JSXExpressionContainer",
            Node::TsType(ty) => match ty.kind {
                TsTypeKind::Ref { .. } => "TSTypeReference",
                TsTypeKind::Union(_) => "TSUnionType",
                TsTypeKind::Intersection(_) => "TSIntersectionType",
                TsTypeKind::Array(_) => "TSArrayType",
                TsTypeKind::Lit(_) => "TSLiteralType",
                TsTypeKind::Fn { .. } => "TSFunctionType",
            },
            Node::TsTypeAnnotation(_) => "TSTypeAnnotation",
            Node::TsTypeParamDecl(_) => "TSTypeParameterDeclaration",
            Node::TsTypeParam(_) => "TSTypeParameter",
            Node::TsInterfaceBody(_) => "TSInterfaceBody",
            Node::TsSignature(sig) => match sig.kind {
                TsSignatureKind::Property { .. } => "TSPropertySignature",
                TsSignatureKind::Method { .. } => "TSMethodSignature",
            },
            Node::TsEnumMember(_) => "TSEnumMember",
        }
    }

    /// Source location of this node.
    pub fn span(&self) -> Span {
        match self {
            Node::Program(n) => n.span,
            Node::Stmt(n) => n.span,
            Node::Expr(n) => n.span,
            Node::VarDeclarator(n) => n.span,
            Node::Binding(n) => n.span,
            Node::Param(n) => n.span,
            Node::Property(n) => n.span,
            Node::Function(n) => n.span,
            Node::ClassBody(n) => n.span,
            Node::ClassMember(n) => n.span,
            Node::SwitchCase(n) => n.span,
            Node::CatchClause(n) => n.span,
            Node::ImportSpecifier(n) => n.span(),
            Node::ExportSpecifier(n) => n.span,
            Node::JsxElement(n) => n.span,
            Node::JsxFragment(n) => n.span,
            Node::JsxOpeningElement(n) => n.span,
            Node::JsxClosingElement(n) => n.span,
            Node::JsxName(n) => n.span(),
            Node::JsxIdent(n) => n.span,
            Node::JsxAttribute(n) => n.span,
            Node::JsxSpreadAttribute(n) => n.span,
            Node::JsxText(n) => n.span,
            Node::JsxExprContainer(n) => n.span,
            Node::TsType(n) => n.span,
            Node::TsTypeAnnotation(n) => n.span,
            Node::TsTypeParamDecl(n) => n.span,
            Node::TsTypeParam(n) => n.span,
            Node::TsInterfaceBody(n) => n.span,
            Node::TsSignature(n) => n.span,
            Node::TsEnumMember(n) => n.span,
        }
    }

    /// Exact source text covered by this node's span, zero-copy.
    pub fn get_text<'s>(&self, source: &'s str) -> &'s str {
        self.span().text(source)
    }

    /// Inclusive, 1-indexed `(start_line, end_line)` for this node.
    ///
    /// Build the [`LineIndex`] once per source; each lookup is then
    /// logarithmic instead of a full rescan.
    pub fn get_line_range(&self, lines: &LineIndex) -> (u32, u32) {
        lines.line_range(self.span())
    }

    /// Declared name, for declaration nodes that have one.
    pub fn name(&self) -> Option<&'a str> {
        match *self {
            Node::Stmt(stmt) => match stmt.kind {
                StmtKind::Function(f) => f.name,
                StmtKind::Class(c) => c.name,
                StmtKind::TsTypeAlias(a) => Some(a.name),
                StmtKind::TsInterface(i) => Some(i.name),
                StmtKind::TsEnum(e) => Some(e.name),
                _ => None,
            },
            Node::Expr(expr) => match expr.kind {
                ExprKind::Ident(name) => Some(name),
                ExprKind::Function(f) => f.name,
                ExprKind::Class(c) => c.name,
                _ => None,
            },
            Node::Binding(binding) => match binding.kind {
                BindingKind::Ident { name } => Some(name),
                _ => None,
            },
            Node::ImportSpecifier(spec) => Some(spec.local()),
            Node::TsEnumMember(member) => Some(member.name),
            Node::TsTypeParam(param) => Some(param.name),
            _ => None,
        }
    }
}
