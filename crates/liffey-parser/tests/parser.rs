//! Integration tests for JavaScript parsing: statement and expression
//! coverage, spans, comments, and traversal over parsed trees.

use liffey_ast::ast::*;
use liffey_ast::{walk, Allocator, LineIndex, Node, Span};
use liffey_parser::{parse, ParseResult, SourceType};

fn parse_module<'a>(allocator: &'a Allocator, source: &'a str) -> ParseResult<'a> {
    let result = parse(allocator, source, SourceType::Module);
    assert!(
        result.is_valid(),
        "expected clean parse, got {:?}",
        result.errors
    );
    result
}

#[test]
fn test_empty_program() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "");
    assert!(result.program.body.is_empty());
    assert_eq!(result.program.span, Span::new(0, 0));
}

#[test]
fn test_statement_span_covers_semicolon() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "const x = 1;");
    assert_eq!(result.program.body.len(), 1);
    assert_eq!(result.program.body[0].span, Span::new(0, 12));
}

#[test]
fn test_var_declaration_kinds() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "var a = 1; let b; const c = 3;");
    let kinds: Vec<VarKind> = result
        .program
        .body
        .iter()
        .map(|stmt| match &stmt.kind {
            StmtKind::Var { kind, .. } => *kind,
            other => panic!("expected var declaration, got {other:?}"),
        })
        .collect();
    assert_eq!(kinds, [VarKind::Var, VarKind::Let, VarKind::Const]);

    let StmtKind::Var { decls, .. } = &result.program.body[1].kind else {
        unreachable!()
    };
    assert!(decls[0].init.is_none());
}

#[test]
fn test_destructuring_bindings() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "const { a, b: c, ...rest } = obj; const [x, , y = 2] = arr;");

    let StmtKind::Var { decls, .. } = &result.program.body[0].kind else {
        unreachable!()
    };
    let BindingKind::Object { properties } = &decls[0].binding.kind else {
        panic!("expected object pattern");
    };
    assert_eq!(properties.len(), 3);
    assert!(properties[0].shorthand);
    assert_eq!(properties[1].key, "b");
    assert!(properties[2].rest);

    let StmtKind::Var { decls, .. } = &result.program.body[1].kind else {
        unreachable!()
    };
    let BindingKind::Array { elements } = &decls[0].binding.kind else {
        panic!("expected array pattern");
    };
    assert_eq!(elements.len(), 3);
    assert!(elements[1].is_none());
    assert!(elements[2].unwrap().default.is_some());
}

#[test]
fn test_operator_precedence() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "x = 1 + 2 * 3;");
    let StmtKind::Expr(assign) = &result.program.body[0].kind else {
        unreachable!()
    };
    let ExprKind::Assign { right, .. } = &assign.kind else {
        panic!("expected assignment");
    };
    // `+` at the top, `*` nested on its right.
    let ExprKind::Binary {
        op: BinaryOp::Add,
        right: mul,
        ..
    } = &right.kind
    else {
        panic!("expected addition at the root, got {:?}", right.kind);
    };
    assert!(matches!(
        mul.kind,
        ExprKind::Binary {
            op: BinaryOp::Mul,
            ..
        }
    ));
}

#[test]
fn test_logical_and_nullish() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "const v = a?.b ?? c;");
    let StmtKind::Var { decls, .. } = &result.program.body[0].kind else {
        unreachable!()
    };
    let ExprKind::Logical {
        op: LogicalOp::NullishCoalesce,
        left,
        ..
    } = &decls[0].init.unwrap().kind
    else {
        panic!("expected ?? at the root");
    };
    assert!(matches!(
        left.kind,
        ExprKind::Member { optional: true, .. }
    ));
}

#[test]
fn test_regex_vs_division() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "const re = /ab+c/gi; const q = a / b;");

    let StmtKind::Var { decls, .. } = &result.program.body[0].kind else {
        unreachable!()
    };
    let ExprKind::Literal(Lit::Regex { pattern, flags }) = decls[0].init.unwrap().kind else {
        panic!("expected regex literal");
    };
    assert_eq!(pattern, "ab+c");
    assert_eq!(flags, "gi");

    let StmtKind::Var { decls, .. } = &result.program.body[1].kind else {
        unreachable!()
    };
    assert!(matches!(
        decls[0].init.unwrap().kind,
        ExprKind::Binary {
            op: BinaryOp::Div,
            ..
        }
    ));
}

#[test]
fn test_template_literal() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "const s = `a ${x} b ${y}`;");
    let StmtKind::Var { decls, .. } = &result.program.body[0].kind else {
        unreachable!()
    };
    let ExprKind::Template { quasis, exprs } = decls[0].init.unwrap().kind else {
        panic!("expected template literal");
    };
    assert_eq!(quasis, ["a ", " b ", ""]);
    assert_eq!(exprs.len(), 2);
}

#[test]
fn test_bigint_and_number_literals() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "const n = 123n; const h = 0xff; const s = 1_000;");
    let inits: Vec<Lit> = result
        .program
        .body
        .iter()
        .map(|stmt| match &stmt.kind {
            StmtKind::Var { decls, .. } => match decls[0].init.unwrap().kind {
                ExprKind::Literal(lit) => lit,
                other => panic!("expected literal, got {other:?}"),
            },
            _ => unreachable!(),
        })
        .collect();
    assert!(matches!(inits[0], Lit::BigInt("123")));
    assert!(matches!(inits[1], Lit::Number(n) if n == 255.0));
    assert!(matches!(inits[2], Lit::Number(n) if n == 1000.0));
}

#[test]
fn test_arrow_functions() {
    let allocator = Allocator::new();
    let result = parse_module(
        &allocator,
        "const f = (a, b) => a + b; const g = async x => x; const h = () => { return 1; };",
    );

    let arrows: Vec<&ArrowFunction> = result
        .program
        .body
        .iter()
        .map(|stmt| match &stmt.kind {
            StmtKind::Var { decls, .. } => match decls[0].init.unwrap().kind {
                ExprKind::Arrow(arrow) => arrow,
                other => panic!("expected arrow function, got {other:?}"),
            },
            _ => unreachable!(),
        })
        .collect();

    assert_eq!(arrows[0].params.len(), 2);
    assert!(matches!(arrows[0].body, ArrowBody::Expr(_)));
    assert!(arrows[1].is_async);
    assert_eq!(arrows[1].params.len(), 1);
    assert!(matches!(arrows[2].body, ArrowBody::Block(_)));
}

#[test]
fn test_function_declaration() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "async function* gen(a, ...rest) { yield a; }");
    let StmtKind::Function(func) = &result.program.body[0].kind else {
        panic!("expected function declaration");
    };
    assert_eq!(func.name, Some("gen"));
    assert!(func.is_async);
    assert!(func.is_generator);
    assert_eq!(func.params.len(), 2);
    assert!(func.params[1].rest);
}

#[test]
fn test_class_members() {
    let allocator = Allocator::new();
    let source = r#"
class Point extends Base {
    x = 0;
    static origin = null;
    constructor(x) { this.x = x; }
    get magnitude() { return this.x; }
    static { init(); }
}
"#;
    let result = parse_module(&allocator, source);
    let StmtKind::Class(class) = &result.program.body[0].kind else {
        panic!("expected class declaration");
    };
    assert_eq!(class.name, Some("Point"));
    assert!(class.super_class.is_some());

    let members = class.body.members;
    assert_eq!(members.len(), 5);
    assert!(matches!(
        members[0].kind,
        ClassMemberKind::Property {
            is_static: false,
            ..
        }
    ));
    assert!(matches!(
        members[1].kind,
        ClassMemberKind::Property { is_static: true, .. }
    ));
    assert!(matches!(
        members[2].kind,
        ClassMemberKind::Method {
            kind: MethodKind::Constructor,
            ..
        }
    ));
    assert!(matches!(
        members[3].kind,
        ClassMemberKind::Method {
            kind: MethodKind::Get,
            ..
        }
    ));
    assert!(matches!(members[4].kind, ClassMemberKind::StaticBlock(_)));
}

#[test]
fn test_control_flow_statements() {
    let allocator = Allocator::new();
    let source = r#"
if (a) { b(); } else c();
while (x) x -= 1;
do { tick(); } while (running);
switch (v) { case 1: one(); break; default: other(); }
outer: for (;;) { break outer; }
try { risky(); } catch (e) { log(e); } finally { done(); }
"#;
    let result = parse_module(&allocator, source);
    let kinds: Vec<&StmtKind> = result.program.body.iter().map(|s| &s.kind).collect();
    assert!(matches!(kinds[0], StmtKind::If { alternate: Some(_), .. }));
    assert!(matches!(kinds[1], StmtKind::While { .. }));
    assert!(matches!(kinds[2], StmtKind::DoWhile { .. }));
    assert!(matches!(kinds[3], StmtKind::Switch { cases, .. } if cases.len() == 2));
    assert!(matches!(kinds[4], StmtKind::Labeled { label: "outer", .. }));
    assert!(
        matches!(kinds[5], StmtKind::Try { handler: Some(h), finalizer: Some(_), .. } if h.param.is_some())
    );
}

#[test]
fn test_for_variants() {
    let allocator = Allocator::new();
    let source = "for (let i = 0; i < n; i++) {} for (const k in obj) {} for await (const c of chunks) {}";
    let result = parse_module(&allocator, source);
    assert!(matches!(
        result.program.body[0].kind,
        StmtKind::For {
            init: Some(ForInit::Var(_)),
            test: Some(_),
            update: Some(_),
            ..
        }
    ));
    assert!(matches!(
        result.program.body[1].kind,
        StmtKind::ForIn {
            left: ForHead::Var(_),
            ..
        }
    ));
    assert!(matches!(
        result.program.body[2].kind,
        StmtKind::ForOf { is_await: true, .. }
    ));
}

#[test]
fn test_for_of_with_bare_pattern() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "for (x of xs) use(x); for ([a, b] of pairs) {}");
    assert!(matches!(
        result.program.body[0].kind,
        StmtKind::ForOf {
            left: ForHead::Pattern(Binding {
                kind: BindingKind::Ident { name: "x" },
                ..
            }),
            ..
        }
    ));
    assert!(matches!(
        result.program.body[1].kind,
        StmtKind::ForOf {
            left: ForHead::Pattern(Binding {
                kind: BindingKind::Array { .. },
                ..
            }),
            ..
        }
    ));
}

#[test]
fn test_imports_and_exports() {
    let allocator = Allocator::new();
    let source = r#"
import React, { useState as us } from "react";
import * as path from "path";
export { a, b as c };
export default React;
export * from "./other";
"#;
    let result = parse_module(&allocator, source);

    let StmtKind::Import(import) = &result.program.body[0].kind else {
        panic!("expected import");
    };
    assert_eq!(import.source, "react");
    assert!(matches!(
        import.specifiers[0],
        ImportSpecifier::Default { local: "React", .. }
    ));
    assert!(matches!(
        import.specifiers[1],
        ImportSpecifier::Named {
            imported: "useState",
            local: "us",
            ..
        }
    ));

    let StmtKind::Import(import) = &result.program.body[1].kind else {
        panic!("expected import");
    };
    assert!(matches!(
        import.specifiers[0],
        ImportSpecifier::Namespace { local: "path", .. }
    ));

    assert!(matches!(
        result.program.body[2].kind,
        StmtKind::Export(ExportDecl::Named { decl: None, specifiers, .. }) if specifiers.len() == 2
    ));
    assert!(matches!(
        result.program.body[3].kind,
        StmtKind::Export(ExportDecl::Default(ExportDefault::Expr(_)))
    ));
    assert!(matches!(
        result.program.body[4].kind,
        StmtKind::Export(ExportDecl::All { exported: None, source: "./other" })
    ));
}

#[test]
fn test_export_declaration() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "export const answer = 42;");
    let StmtKind::Export(ExportDecl::Named {
        decl: Some(decl), ..
    }) = &result.program.body[0].kind
    else {
        panic!("expected export declaration");
    };
    assert!(matches!(decl.kind, StmtKind::Var { .. }));
}

#[test]
fn test_comments_channel() {
    let allocator = Allocator::new();
    let source = "// Line 1\nlet x = 1; /* block\ncomment */ let y = 2;";
    let result = parse_module(&allocator, source);

    assert_eq!(result.comments.len(), 2);
    assert_eq!(result.comments[0].text, " Line 1");
    assert!(result.comments[0].is_line());
    assert_eq!(result.comments[1].text, " block\ncomment ");
    assert!(result.comments[1].is_block);
    // Spans include the delimiters.
    assert_eq!(result.comments[0].span, Span::new(0, 9));
}

#[test]
fn test_comment_markers_inside_strings_are_not_comments() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, r#"const url = "https://example.com";"#);
    assert!(result.comments.is_empty());
}

#[test]
fn test_line_ranges() {
    let allocator = Allocator::new();
    let source = "const x = 1;\nconst y = 2;";
    let result = parse_module(&allocator, source);
    let lines = LineIndex::new(source);

    let first = Node::Stmt(&result.program.body[0]);
    let second = Node::Stmt(&result.program.body[1]);
    assert_eq!(first.get_line_range(&lines), (1, 1));
    assert_eq!(second.get_line_range(&lines), (2, 2));
    assert_eq!(first.get_text(source), "const x = 1;");
}

#[test]
fn test_walk_parsed_tree() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "let x = 1; f(x);");

    let visited: Vec<(&str, u32)> = walk(Node::Program(&result.program))
        .map(|(node, depth)| (node.type_name(), depth))
        .collect();
    assert_eq!(
        visited,
        [
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
fn test_node_names_from_parsed_tree() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "function foo() {} class Bar {}");

    let names: Vec<Option<&str>> = result
        .program
        .body
        .iter()
        .map(|stmt| Node::Stmt(stmt).name())
        .collect();
    assert_eq!(names, [Some("foo"), Some("Bar")]);
}

#[test]
fn test_allocator_reuse_across_parses() {
    let mut allocator = Allocator::new();
    for _ in 0..3 {
        {
            let result = parse_module(&allocator, "const x = [1, 2, 3].map(n => n * 2);");
            assert_eq!(result.program.body.len(), 1);
        }
        allocator.reset();
    }
}

#[test]
fn test_contextual_words_stay_identifiers_in_js() {
    let allocator = Allocator::new();
    // In plain JavaScript these are ordinary names, not keywords.
    let result = parse_module(&allocator, "const type = 1; let interface = type + 1; enum = 2;");
    assert_eq!(result.program.body.len(), 3);
    assert!(matches!(
        result.program.body[2].kind,
        StmtKind::Expr(Expr {
            kind: ExprKind::Assign { .. },
            ..
        })
    ));
}

#[test]
fn test_tagged_template_and_spread_call() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "tag`x${y}`; f(...args);");
    assert!(matches!(
        result.program.body[0].kind,
        StmtKind::Expr(Expr {
            kind: ExprKind::TaggedTemplate { .. },
            ..
        })
    ));
    let StmtKind::Expr(call) = &result.program.body[1].kind else {
        unreachable!()
    };
    let ExprKind::Call { args, .. } = call.kind else {
        panic!("expected call");
    };
    assert!(matches!(args[0].kind, ExprKind::Spread(_)));
}

#[test]
fn test_new_and_member_chain() {
    let allocator = Allocator::new();
    let result = parse_module(&allocator, "const p = new a.b.C(1).run();");
    let StmtKind::Var { decls, .. } = &result.program.body[0].kind else {
        unreachable!()
    };
    // `new a.b.C(1)` is the object of the `.run()` call.
    let ExprKind::Call { callee, .. } = decls[0].init.unwrap().kind else {
        panic!("expected call");
    };
    let ExprKind::Member { object, .. } = callee.kind else {
        panic!("expected member access");
    };
    assert!(matches!(object.kind, ExprKind::New { args, .. } if args.len() == 1));
}

#[test]
fn test_with_statement_per_dialect() {
    let allocator = Allocator::new();
    let source = "with (o) { f(); }";

    let script = parse(&allocator, source, SourceType::Script);
    assert!(script.is_valid(), "{:?}", script.errors);
    assert!(matches!(script.program.body[0].kind, StmtKind::With { .. }));

    // Module code still gets a tree, but with a diagnostic attached.
    let module = parse(&allocator, source, SourceType::Module);
    assert!(!module.is_valid());
    assert!(module.errors[0].message.contains("with"));
    assert!(matches!(module.program.body[0].kind, StmtKind::With { .. }));
}

#[test]
fn test_unterminated_block_comment() {
    let allocator = Allocator::new();
    let result = parse(&allocator, "let a = 1; /* trailing", SourceType::Module);

    assert!(!result.is_valid());
    assert!(result
        .errors
        .iter()
        .any(|e| e.message.contains("block comment")));
    // The comment is still delivered, running to end of input.
    assert_eq!(result.comments.len(), 1);
    assert_eq!(result.comments[0].text, " trailing");
}

#[test]
fn test_lookahead_does_not_duplicate_comments() {
    let allocator = Allocator::new();
    // Arrow detection rescans the parenthesized head, comment included.
    let result = parse_module(&allocator, "const f = (/* params */ a, b) => a + b;");
    assert_eq!(result.comments.len(), 1);
    assert_eq!(result.comments[0].text, " params ");
}
