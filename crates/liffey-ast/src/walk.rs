//! Depth-first tree traversal.
//!
//! [`walk`] yields every node reachable from a root in pre-order: a parent
//! is always yielded before any of its children, and children are visited
//! left to right in source order. Each item carries the node together with
//! its depth, where the root is depth 0.
//!
//! The iterator keeps an explicit stack instead of recursing, so deeply
//! nested sources cannot overflow the thread stack during traversal.

use crate::ast::*;
use crate::jsx::*;
use crate::node::Node;
use crate::typescript::*;

/// Pre-order iterator over a subtree. Construct with [`walk`].
pub struct Walk<'a> {
    stack: Vec<(Node<'a>, u32)>,
    scratch: Vec<Node<'a>>,
}

/// Walk the subtree rooted at `root` in depth-first pre-order.
pub fn walk(root: Node<'_>) -> Walk<'_> {
    Walk {
        stack: vec![(root, 0)],
        scratch: Vec::new(),
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (Node<'a>, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.scratch.clear();
        collect_children(node, &mut self.scratch);
        // Popping the scratch buffer pushes children in reverse, so the
        // leftmost child ends up on top of the stack.
        while let Some(child) = self.scratch.pop() {
            self.stack.push((child, depth + 1));
        }
        Some((node, depth))
    }
}

fn collect_children<'a>(node: Node<'a>, out: &mut Vec<Node<'a>>) {
    match node {
        Node::Program(program) => {
            out.extend(program.body.iter().map(Node::Stmt));
        }
        Node::Stmt(stmt) => stmt_children(stmt, out),
        Node::Expr(expr) => expr_children(expr, out),

        Node::VarDeclarator(decl) => {
            out.push(Node::Binding(&decl.binding));
            if let Some(ann) = decl.type_ann {
                out.push(Node::TsTypeAnnotation(ann));
            }
            if let Some(init) = &decl.init {
                out.push(Node::Expr(init));
            }
        }
        Node::Binding(binding) => match &binding.kind {
            BindingKind::Ident { .. } => {}
            BindingKind::Array { elements } => {
                for element in elements.iter().flatten() {
                    out.push(Node::Binding(&element.binding));
                    if let Some(default) = &element.default {
                        out.push(Node::Expr(default));
                    }
                }
            }
            BindingKind::Object { properties } => {
                for property in properties.iter() {
                    out.push(Node::Binding(&property.value));
                    if let Some(default) = &property.default {
                        out.push(Node::Expr(default));
                    }
                }
            }
        },
        Node::Param(param) => {
            out.push(Node::Binding(&param.binding));
            if let Some(ann) = param.type_ann {
                out.push(Node::TsTypeAnnotation(ann));
            }
            if let Some(default) = &param.default {
                out.push(Node::Expr(default));
            }
        }
        Node::Property(property) => {
            out.push(Node::Expr(&property.key));
            // A shorthand property's value is the key identifier again.
            if !property.shorthand {
                out.push(Node::Expr(&property.value));
            }
        }
        Node::Function(function) => function_children(function, out),
        Node::ClassBody(body) => {
            out.extend(body.members.iter().map(Node::ClassMember));
        }
        Node::ClassMember(member) => match &member.kind {
            ClassMemberKind::Method { key, value, .. } => {
                out.push(Node::Expr(key));
                out.push(Node::Function(value));
            }
            ClassMemberKind::Property {
                key,
                type_ann,
                value,
                ..
            } => {
                out.push(Node::Expr(key));
                if let Some(ann) = type_ann {
                    out.push(Node::TsTypeAnnotation(ann));
                }
                if let Some(value) = value {
                    out.push(Node::Expr(value));
                }
            }
            ClassMemberKind::StaticBlock(body) => {
                out.extend(body.iter().map(Node::Stmt));
            }
        },
        Node::SwitchCase(case) => {
            if let Some(test) = &case.test {
                out.push(Node::Expr(test));
            }
            out.extend(case.consequent.iter().map(Node::Stmt));
        }
        Node::CatchClause(clause) => {
            if let Some(param) = &clause.param {
                out.push(Node::Binding(param));
            }
            out.push(Node::Stmt(clause.body));
        }
        Node::ImportSpecifier(_) | Node::ExportSpecifier(_) => {}

        Node::JsxElement(element) => jsx_element_children(element, out),
        Node::JsxFragment(fragment) => jsx_children(fragment.children, out),
        Node::JsxOpeningElement(opening) => {
            out.push(Node::JsxName(&opening.name));
            for item in opening.attributes.iter() {
                match item {
                    JsxAttrItem::Attribute(attr) => out.push(Node::JsxAttribute(attr)),
                    JsxAttrItem::Spread(spread) => out.push(Node::JsxSpreadAttribute(spread)),
                }
            }
        }
        Node::JsxClosingElement(closing) => {
            out.push(Node::JsxName(&closing.name));
        }
        Node::JsxName(name) => {
            if let JsxName::Member {
                object, property, ..
            } = name
            {
                out.push(Node::JsxName(object));
                out.push(Node::JsxIdent(property));
            }
        }
        Node::JsxIdent(_) | Node::JsxText(_) => {}
        Node::JsxAttribute(attr) => {
            out.push(Node::JsxIdent(&attr.name));
            match &attr.value {
                Some(JsxAttrValue::Container(container)) => {
                    out.push(Node::JsxExprContainer(container));
                }
                Some(JsxAttrValue::Element(element)) => out.push(Node::JsxElement(element)),
                Some(JsxAttrValue::Fragment(fragment)) => out.push(Node::JsxFragment(fragment)),
                Some(JsxAttrValue::StringLit { .. }) | None => {}
            }
        }
        Node::JsxSpreadAttribute(spread) => {
            out.push(Node::Expr(&spread.argument));
        }
        Node::JsxExprContainer(container) => {
            if let Some(expr) = &container.expr {
                out.push(Node::Expr(expr));
            }
        }

        Node::TsType(ty) => match &ty.kind {
            TsTypeKind::Ref { type_args, .. } => {
                out.extend(type_args.iter().map(Node::TsType));
            }
            TsTypeKind::Union(members) | TsTypeKind::Intersection(members) => {
                out.extend(members.iter().map(Node::TsType));
            }
            TsTypeKind::Array(element) => out.push(Node::TsType(element)),
            TsTypeKind::Lit(_) => {}
            TsTypeKind::Fn {
                params,
                return_type,
            } => {
                out.extend(params.iter().map(Node::Param));
                out.push(Node::TsType(return_type));
            }
        },
        Node::TsTypeAnnotation(ann) => {
            out.push(Node::TsType(&ann.type_ann));
        }
        Node::TsTypeParamDecl(decl) => {
            out.extend(decl.params.iter().map(Node::TsTypeParam));
        }
        Node::TsTypeParam(param) => {
            if let Some(constraint) = &param.constraint {
                out.push(Node::TsType(constraint));
            }
            if let Some(default) = &param.default {
                out.push(Node::TsType(default));
            }
        }
        Node::TsInterfaceBody(body) => {
            out.extend(body.members.iter().map(Node::TsSignature));
        }
        Node::TsSignature(sig) => match &sig.kind {
            TsSignatureKind::Property { type_ann, .. } => {
                if let Some(ann) = type_ann {
                    out.push(Node::TsTypeAnnotation(ann));
                }
            }
            TsSignatureKind::Method {
                params,
                return_type,
                ..
            } => {
                out.extend(params.iter().map(Node::Param));
                if let Some(ann) = return_type {
                    out.push(Node::TsTypeAnnotation(ann));
                }
            }
        },
        Node::TsEnumMember(member) => {
            if let Some(init) = &member.init {
                out.push(Node::Expr(init));
            }
        }
    }
}

fn stmt_children<'a>(stmt: &'a Stmt<'a>, out: &mut Vec<Node<'a>>) {
    match &stmt.kind {
        StmtKind::Var { decls, .. } => {
            out.extend(decls.iter().map(Node::VarDeclarator));
        }
        StmtKind::Function(function) => function_children(function, out),
        StmtKind::Class(class) => class_children(class, out),
        StmtKind::TsTypeAlias(alias) => {
            if let Some(params) = alias.type_params {
                out.push(Node::TsTypeParamDecl(params));
            }
            out.push(Node::TsType(&alias.type_ann));
        }
        StmtKind::TsInterface(interface) => {
            if let Some(params) = interface.type_params {
                out.push(Node::TsTypeParamDecl(params));
            }
            out.extend(interface.extends.iter().map(Node::TsType));
            out.push(Node::TsInterfaceBody(&interface.body));
        }
        StmtKind::TsEnum(ts_enum) => {
            out.extend(ts_enum.members.iter().map(Node::TsEnumMember));
        }

        StmtKind::Block(body) => {
            out.extend(body.iter().map(Node::Stmt));
        }
        StmtKind::If {
            test,
            consequent,
            alternate,
        } => {
            out.push(Node::Expr(test));
            out.push(Node::Stmt(consequent));
            if let Some(alternate) = *alternate {
                out.push(Node::Stmt(alternate));
            }
        }
        StmtKind::Switch {
            discriminant,
            cases,
        } => {
            out.push(Node::Expr(discriminant));
            out.extend(cases.iter().map(Node::SwitchCase));
        }
        StmtKind::For {
            init,
            test,
            update,
            body,
        } => {
            match init {
                Some(ForInit::Var(decl)) => out.push(Node::Stmt(decl)),
                Some(ForInit::Expr(expr)) => out.push(Node::Expr(expr)),
                None => {}
            }
            if let Some(test) = test {
                out.push(Node::Expr(test));
            }
            if let Some(update) = update {
                out.push(Node::Expr(update));
            }
            out.push(Node::Stmt(body));
        }
        StmtKind::ForIn { left, right, body }
        | StmtKind::ForOf {
            left, right, body, ..
        } => {
            match left {
                ForHead::Var(decl) => out.push(Node::Stmt(decl)),
                ForHead::Pattern(binding) => out.push(Node::Binding(binding)),
            }
            out.push(Node::Expr(right));
            out.push(Node::Stmt(body));
        }
        StmtKind::While { test, body } => {
            out.push(Node::Expr(test));
            out.push(Node::Stmt(body));
        }
        StmtKind::DoWhile { body, test } => {
            out.push(Node::Stmt(body));
            out.push(Node::Expr(test));
        }
        StmtKind::Break { .. } | StmtKind::Continue { .. } => {}
        StmtKind::Return { arg } => {
            if let Some(arg) = arg {
                out.push(Node::Expr(arg));
            }
        }
        StmtKind::Throw { arg } => out.push(Node::Expr(arg)),
        StmtKind::Try {
            block,
            handler,
            finalizer,
        } => {
            out.push(Node::Stmt(block));
            if let Some(handler) = *handler {
                out.push(Node::CatchClause(handler));
            }
            if let Some(finalizer) = *finalizer {
                out.push(Node::Stmt(finalizer));
            }
        }
        StmtKind::Labeled { body, .. } => out.push(Node::Stmt(body)),

        StmtKind::Expr(expr) => out.push(Node::Expr(expr)),
        StmtKind::Empty | StmtKind::Debugger => {}
        StmtKind::With { object, body } => {
            out.push(Node::Expr(object));
            out.push(Node::Stmt(body));
        }

        StmtKind::Import(import) => {
            out.extend(import.specifiers.iter().map(Node::ImportSpecifier));
        }
        StmtKind::Export(export) => match export {
            ExportDecl::Named {
                decl, specifiers, ..
            } => {
                if let Some(decl) = *decl {
                    out.push(Node::Stmt(decl));
                }
                out.extend(specifiers.iter().map(Node::ExportSpecifier));
            }
            ExportDecl::Default(ExportDefault::Decl(decl)) => out.push(Node::Stmt(decl)),
            ExportDecl::Default(ExportDefault::Expr(expr)) => out.push(Node::Expr(expr)),
            ExportDecl::All { .. } => {}
        },
    }
}

fn expr_children<'a>(expr: &'a Expr<'a>, out: &mut Vec<Node<'a>>) {
    match &expr.kind {
        ExprKind::Ident(_) | ExprKind::This | ExprKind::Super | ExprKind::Literal(_) => {}
        ExprKind::Template { exprs, .. } => {
            out.extend(exprs.iter().map(Node::Expr));
        }
        ExprKind::Array(elements) => {
            out.extend(elements.iter().flatten().map(Node::Expr));
        }
        ExprKind::Object(properties) => {
            out.extend(properties.iter().map(Node::Property));
        }
        ExprKind::Function(function) => function_children(function, out),
        ExprKind::Arrow(arrow) => {
            out.extend(arrow.params.iter().map(Node::Param));
            if let Some(ann) = arrow.return_type {
                out.push(Node::TsTypeAnnotation(ann));
            }
            match arrow.body {
                ArrowBody::Expr(expr) => out.push(Node::Expr(expr)),
                ArrowBody::Block(block) => out.push(Node::Stmt(block)),
            }
        }
        ExprKind::Class(class) => class_children(class, out),
        ExprKind::Unary { arg, .. } | ExprKind::Update { arg, .. } => {
            out.push(Node::Expr(arg));
        }
        ExprKind::Binary { left, right, .. }
        | ExprKind::Logical { left, right, .. }
        | ExprKind::Assign { left, right, .. } => {
            out.push(Node::Expr(left));
            out.push(Node::Expr(right));
        }
        ExprKind::Conditional {
            test,
            consequent,
            alternate,
        } => {
            out.push(Node::Expr(test));
            out.push(Node::Expr(consequent));
            out.push(Node::Expr(alternate));
        }
        ExprKind::Sequence(exprs) => {
            out.extend(exprs.iter().map(Node::Expr));
        }
        ExprKind::Member {
            object, property, ..
        } => {
            out.push(Node::Expr(object));
            out.push(Node::Expr(property));
        }
        ExprKind::Call { callee, args, .. } | ExprKind::New { callee, args } => {
            out.push(Node::Expr(callee));
            out.extend(args.iter().map(Node::Expr));
        }
        ExprKind::TaggedTemplate { tag, quasi } => {
            out.push(Node::Expr(tag));
            out.push(Node::Expr(quasi));
        }
        ExprKind::Spread(arg) | ExprKind::Await(arg) => out.push(Node::Expr(arg)),
        ExprKind::Yield { arg, .. } => {
            if let Some(arg) = *arg {
                out.push(Node::Expr(arg));
            }
        }
        // The expression node already carries the JSX tag, so the element's
        // parts become its direct children rather than a duplicate node.
        ExprKind::JsxElement(element) => jsx_element_children(element, out),
        ExprKind::JsxFragment(fragment) => jsx_children(fragment.children, out),
        ExprKind::TsAs { expr, type_ann } => {
            out.push(Node::Expr(expr));
            out.push(Node::TsType(type_ann));
        }
    }
}

fn function_children<'a>(function: &'a Function<'a>, out: &mut Vec<Node<'a>>) {
    if let Some(params) = function.type_params {
        out.push(Node::TsTypeParamDecl(params));
    }
    out.extend(function.params.iter().map(Node::Param));
    if let Some(ann) = function.return_type {
        out.push(Node::TsTypeAnnotation(ann));
    }
    if let Some(body) = function.body {
        out.push(Node::Stmt(body));
    }
}

fn class_children<'a>(class: &'a Class<'a>, out: &mut Vec<Node<'a>>) {
    if let Some(params) = class.type_params {
        out.push(Node::TsTypeParamDecl(params));
    }
    if let Some(super_class) = class.super_class {
        out.push(Node::Expr(super_class));
    }
    out.push(Node::ClassBody(class.body));
}

fn jsx_element_children<'a>(element: &'a JsxElement<'a>, out: &mut Vec<Node<'a>>) {
    out.push(Node::JsxOpeningElement(&element.opening));
    jsx_children(element.children, out);
    if let Some(closing) = &element.closing {
        out.push(Node::JsxClosingElement(closing));
    }
}

fn jsx_children<'a>(children: &'a [JsxChild<'a>], out: &mut Vec<Node<'a>>) {
    for child in children {
        match child {
            JsxChild::Element(element) => out.push(Node::JsxElement(element)),
            JsxChild::Fragment(fragment) => out.push(Node::JsxFragment(fragment)),
            JsxChild::Text(text) => out.push(Node::JsxText(text)),
            JsxChild::Container(container) => out.push(Node::JsxExprContainer(container)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Allocator;
    use crate::span::Span;

    // Hand-builds `let x = 1; f(x);` without going through a parser.
    fn sample_program<'a>(allocator: &'a Allocator) -> &'a Program<'a> {
        let one = Expr::new(ExprKind::Literal(Lit::Number(1.0)), Span::new(8, 9));
        let decl = VarDeclarator {
            binding: Binding::new(BindingKind::Ident { name: "x" }, Span::new(4, 5)),
            type_ann: None,
            init: Some(one),
            span: Span::new(4, 9),
        };
        let decls = allocator.alloc([decl]);
        let var = Stmt::new(
            StmtKind::Var {
                kind: VarKind::Let,
                decls: &decls[..],
            },
            Span::new(0, 10),
        );

        let callee = allocator.alloc(Expr::new(ExprKind::Ident("f"), Span::new(11, 12)));
        let args = allocator.alloc([Expr::new(ExprKind::Ident("x"), Span::new(13, 14))]);
        let call = Expr::new(
            ExprKind::Call {
                callee,
                args: &args[..],
                optional: false,
            },
            Span::new(11, 15),
        );
        let call_stmt = Stmt::new(StmtKind::Expr(call), Span::new(11, 16));

        let body = allocator.alloc([var, call_stmt]);
        allocator.alloc(Program::new(&body[..], Span::new(0, 16)))
    }

    #[test]
    fn test_preorder_types_and_depths() {
        let allocator = Allocator::new();
        let program = sample_program(&allocator);

        let visited: Vec<(&str, u32)> = walk(Node::Program(program))
            .map(|(node, depth)| (node.type_name(), depth))
            .collect();

        assert_eq!(
            visited,
            vec![
                ("Program", 0),
                ("VariableDeclaration", 1),
                ("VariableDeclarator", 2),
                ("Identifier", 3),
                ("Literal", 3),
                ("ExpressionStatement", 1),
                ("CallExpression", 2),
                ("Identifier", 3),
                ("Identifier", 3),
            ]
        );
    }

    #[test]
    fn test_parent_before_children() {
        let allocator = Allocator::new();
        let program = sample_program(&allocator);

        let mut last_depth = 0;
        for (_, depth) in walk(Node::Program(program)) {
            // Pre-order: depth can only grow one level at a time.
            assert!(depth <= last_depth + 1);
            last_depth = depth;
        }
    }

    #[test]
    fn test_subtree_walk_starts_at_given_root() {
        let allocator = Allocator::new();
        let program = sample_program(&allocator);

        let StmtKind::Expr(call) = &program.body[1].kind else {
            panic!("expected expression statement");
        };
        let visited: Vec<&str> = walk(Node::Expr(call))
            .map(|(node, _)| node.type_name())
            .collect();
        assert_eq!(
            visited,
            vec!["CallExpression", "Identifier", "Identifier"]
        );
    }

    #[test]
    fn test_walk_is_deterministic() {
        let allocator = Allocator::new();
        let program = sample_program(&allocator);

        let a: Vec<&str> = walk(Node::Program(program))
            .map(|(n, _)| n.type_name())
            .collect();
        let b: Vec<&str> = walk(Node::Program(program))
            .map(|(n, _)| n.type_name())
            .collect();
        assert_eq!(a, b);
    }
}
