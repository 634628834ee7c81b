//! Integration tests for error recovery: broken statements produce
//! diagnostics while the rest of the file still parses.

use liffey_ast::ast::StmtKind;
use liffey_ast::Allocator;
use liffey_parser::{parse, SourceType};

#[test]
fn test_bad_statement_does_not_hide_the_rest() {
    let allocator = Allocator::new();
    let result = parse(&allocator, "let = 5;\nconst ok = 1;", SourceType::Module);

    assert!(!result.is_valid());
    assert!(!result.panicked);
    assert_eq!(result.errors.len(), 1);

    // The second statement survived recovery.
    assert_eq!(result.program.body.len(), 1);
    assert!(matches!(result.program.body[0].kind, StmtKind::Var { .. }));
}

#[test]
fn test_multiple_errors_reported_in_order() {
    let allocator = Allocator::new();
    let source = "let = 1;\nconst = 2;\nlet fine = 3;";
    let result = parse(&allocator, source, SourceType::Module);

    assert_eq!(result.errors.len(), 2);
    assert!(result.errors[0].span.start < result.errors[1].span.start);
    assert_eq!(result.program.body.len(), 1);
}

#[test]
fn test_recovery_inside_block() {
    let allocator = Allocator::new();
    let source = "function f() { let = 1; return 2; }\nconst after = 3;";
    let result = parse(&allocator, source, SourceType::Module);

    assert!(!result.is_valid());
    assert_eq!(result.program.body.len(), 2);
    let StmtKind::Function(func) = &result.program.body[0].kind else {
        panic!("expected function");
    };
    // The bad statement was dropped but the return survived.
    let StmtKind::Block(body) = &func.body.unwrap().kind else {
        unreachable!()
    };
    assert_eq!(body.len(), 1);
    assert!(matches!(body[0].kind, StmtKind::Return { .. }));
}

#[test]
fn test_unterminated_string_is_an_error() {
    let allocator = Allocator::new();
    let result = parse(&allocator, "const s = \"oops\nconst t = 1;", SourceType::Module);
    assert!(!result.is_valid());
}

#[test]
fn test_stray_closer_at_top_level() {
    let allocator = Allocator::new();
    let result = parse(&allocator, "}\nconst x = 1;", SourceType::Module);
    assert!(!result.is_valid());
    assert!(!result.panicked);
    assert_eq!(result.program.body.len(), 1);
}

#[test]
fn test_deep_nesting_panics_instead_of_overflowing() {
    let allocator = Allocator::new();
    let source = format!("{}x{};", "(".repeat(400), ")".repeat(400));
    let result = parse(&allocator, &source, SourceType::Module);

    assert!(result.panicked);
    assert!(!result.is_valid());
    assert!(result
        .errors
        .iter()
        .any(|e| e.message.contains("depth")));
}

#[test]
fn test_panicked_parse_keeps_prefix() {
    let allocator = Allocator::new();
    let source = format!("const a = 1;\nconst b = {}x{};", "(".repeat(400), ")".repeat(400));
    let result = parse(&allocator, &source, SourceType::Module);

    assert!(result.panicked);
    assert_eq!(result.program.body.len(), 1);
}

#[test]
fn test_eof_in_the_middle_of_a_statement() {
    let allocator = Allocator::new();
    let result = parse(&allocator, "const x =", SourceType::Module);
    assert!(!result.is_valid());
    assert!(!result.panicked);
}

#[test]
fn test_mismatched_jsx_tag_is_reported() {
    let allocator = Allocator::new();
    let result = parse(&allocator, "<div>text</span>;", SourceType::Jsx);
    assert!(!result.is_valid());
    assert!(result
        .errors
        .iter()
        .any(|e| e.message.contains("Mismatched")));
}

#[test]
fn test_module_syntax_diagnosed_in_script() {
    let allocator = Allocator::new();
    let result = parse(
        &allocator,
        "import x from \"m\";\nexport { x };",
        SourceType::Script,
    );

    assert!(!result.is_valid());
    assert!(!result.panicked);
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors[0].message.contains("import"));
    assert!(result.errors[1].message.contains("export"));
    // Both declarations still materialize for tooling.
    assert_eq!(result.program.body.len(), 2);
}
