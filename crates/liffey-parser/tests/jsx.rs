//! Integration tests for JSX parsing: elements, fragments, attributes,
//! and verbatim text children.

use liffey_ast::ast::*;
use liffey_ast::{JsxAttrItem, JsxAttrValue, JsxChild, JsxName, Allocator, Span};
use liffey_parser::{parse, ParseResult, Severity, SourceType};

fn parse_jsx<'a>(allocator: &'a Allocator, source: &'a str) -> ParseResult<'a> {
    let result = parse(allocator, source, SourceType::Jsx);
    assert!(
        result.is_valid(),
        "expected clean parse, got {:?}",
        result.errors
    );
    result
}

fn first_element<'a>(result: &ParseResult<'a>) -> &'a liffey_ast::JsxElement<'a> {
    match &result.program.body[0].kind {
        StmtKind::Expr(Expr {
            kind: ExprKind::JsxElement(element),
            ..
        }) => element,
        other => panic!("expected JSX element statement, got {other:?}"),
    }
}

#[test]
fn test_element_with_attributes_and_children() {
    let allocator = Allocator::new();
    let source = r#"<div className="box" onClick={handle}>Hello {name}</div>;"#;
    let result = parse_jsx(&allocator, source);
    let element = first_element(&result);

    assert!(matches!(
        element.opening.name,
        JsxName::Ident(ident) if ident.name == "div"
    ));
    assert!(!element.opening.self_closing);

    let attrs = element.opening.attributes;
    assert_eq!(attrs.len(), 2);
    let JsxAttrItem::Attribute(class_attr) = attrs[0] else {
        panic!("expected named attribute");
    };
    assert_eq!(class_attr.name.name, "className");
    assert!(matches!(
        class_attr.value,
        Some(JsxAttrValue::StringLit { value: "box", .. })
    ));
    let JsxAttrItem::Attribute(click_attr) = attrs[1] else {
        panic!("expected named attribute");
    };
    assert!(matches!(
        click_attr.value,
        Some(JsxAttrValue::Container(c)) if c.expr.is_some()
    ));

    // Text is kept verbatim, including trailing whitespace.
    let children = element.children;
    assert_eq!(children.len(), 2);
    let JsxChild::Text(text) = children[0] else {
        panic!("expected text child");
    };
    assert_eq!(text.value, "Hello ");
    assert!(matches!(children[1], JsxChild::Container(c) if c.expr.is_some()));

    assert!(element.closing.is_some());
}

#[test]
fn test_self_closing_and_spread() {
    let allocator = Allocator::new();
    let result = parse_jsx(&allocator, "<input {...props} disabled />;");
    let element = first_element(&result);

    assert!(element.opening.self_closing);
    assert!(element.closing.is_none());
    assert!(element.children.is_empty());

    let attrs = element.opening.attributes;
    assert!(matches!(attrs[0], JsxAttrItem::Spread(_)));
    let JsxAttrItem::Attribute(flag) = attrs[1] else {
        panic!("expected bare attribute");
    };
    assert_eq!(flag.name.name, "disabled");
    assert!(flag.value.is_none());
}

#[test]
fn test_fragment_and_nesting() {
    let allocator = Allocator::new();
    let source = "<>\n  <li>a</li>\n  <li>b</li>\n</>;";
    let result = parse_jsx(&allocator, source);

    let StmtKind::Expr(Expr {
        kind: ExprKind::JsxFragment(fragment),
        ..
    }) = &result.program.body[0].kind
    else {
        panic!("expected fragment");
    };

    // Whitespace between the items is real text children.
    let elements: Vec<_> = fragment
        .children
        .iter()
        .filter(|child| matches!(child, JsxChild::Element(_)))
        .collect();
    assert_eq!(elements.len(), 2);
    assert!(fragment
        .children
        .iter()
        .any(|child| matches!(child, JsxChild::Text(t) if t.value.contains('\n'))));
}

#[test]
fn test_member_and_dashed_names() {
    let allocator = Allocator::new();
    let result = parse_jsx(&allocator, r#"<Foo.Bar data-id="1" aria-label="x" />;"#);
    let element = first_element(&result);

    let JsxName::Member { object, property, .. } = element.opening.name else {
        panic!("expected member name");
    };
    assert!(matches!(object, JsxName::Ident(ident) if ident.name == "Foo"));
    assert_eq!(property.name, "Bar");

    let JsxAttrItem::Attribute(attr) = element.opening.attributes[0] else {
        panic!("expected attribute");
    };
    assert_eq!(attr.name.name, "data-id");
}

#[test]
fn test_duplicate_attribute_warns() {
    let allocator = Allocator::new();
    let result = parse(
        &allocator,
        r#"<a href="1" href="2" />;"#,
        SourceType::Jsx,
    );
    // Any diagnostic counts against validity, warnings included.
    assert!(!result.is_valid());
    assert_eq!(result.is_valid(), result.errors.is_empty() && !result.panicked);
    assert!(!result.panicked);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].severity, Severity::Warning);
    assert!(result.errors[0].message.contains("href"));
}

#[test]
fn test_empty_expression_container() {
    let allocator = Allocator::new();
    let result = parse_jsx(&allocator, "<div>{}</div>;");
    let element = first_element(&result);
    assert!(matches!(
        element.children[0],
        JsxChild::Container(c) if c.expr.is_none()
    ));
}

#[test]
fn test_jsx_in_expression_position() {
    let allocator = Allocator::new();
    let result = parse_jsx(
        &allocator,
        "const view = cond ? <b>yes</b> : <i>no</i>;",
    );
    let StmtKind::Var { decls, .. } = &result.program.body[0].kind else {
        unreachable!()
    };
    let ExprKind::Conditional {
        consequent,
        alternate,
        ..
    } = decls[0].init.unwrap().kind
    else {
        panic!("expected conditional");
    };
    assert!(matches!(consequent.kind, ExprKind::JsxElement(_)));
    assert!(matches!(alternate.kind, ExprKind::JsxElement(_)));
}

#[test]
fn test_tsx_combines_types_and_jsx() {
    let allocator = Allocator::new();
    let source = "const render = (items: string[]) => <ul>{items}</ul>;";
    let result = parse(&allocator, source, SourceType::Tsx);
    assert!(result.is_valid(), "{:?}", result.errors);
}

#[test]
fn test_element_spans() {
    let allocator = Allocator::new();
    let source = "<p>t</p>;";
    let result = parse_jsx(&allocator, source);
    let element = first_element(&result);
    assert_eq!(element.span, Span::new(0, 8));
    assert_eq!(element.opening.span, Span::new(0, 3));
    assert_eq!(element.closing.unwrap().span, Span::new(4, 8));
}

#[test]
fn test_jsx_not_enabled_in_plain_module() {
    let allocator = Allocator::new();
    // Without a JSX dialect `<` is a comparison, so this is a syntax error.
    let result = parse(&allocator, "<div>x</div>;", SourceType::Module);
    assert!(!result.is_valid());
}
