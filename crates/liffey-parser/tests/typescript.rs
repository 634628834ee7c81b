//! Integration tests for TypeScript parsing: contextual declarations,
//! type annotations, and `as` expressions.

use liffey_ast::ast::*;
use liffey_ast::{TsSignatureKind, TsTypeKind};
use liffey_ast::Allocator;
use liffey_parser::{parse, ParseResult, SourceType};

fn parse_ts<'a>(allocator: &'a Allocator, source: &'a str) -> ParseResult<'a> {
    let result = parse(allocator, source, SourceType::Ts);
    assert!(
        result.is_valid(),
        "expected clean parse, got {:?}",
        result.errors
    );
    result
}

#[test]
fn test_type_alias_union() {
    let allocator = Allocator::new();
    let result = parse_ts(&allocator, "type Id = string | number;");
    let StmtKind::TsTypeAlias(alias) = &result.program.body[0].kind else {
        panic!("expected type alias");
    };
    assert_eq!(alias.name, "Id");
    let TsTypeKind::Union(parts) = alias.type_ann.kind else {
        panic!("expected union type");
    };
    assert_eq!(parts.len(), 2);
    assert!(matches!(parts[0].kind, TsTypeKind::Ref { name: "string", .. }));
}

#[test]
fn test_type_alias_with_params_and_fn_type() {
    let allocator = Allocator::new();
    let result = parse_ts(&allocator, "type Handler<T extends Event = Event> = (e: T) => void;");
    let StmtKind::TsTypeAlias(alias) = &result.program.body[0].kind else {
        panic!("expected type alias");
    };
    let params = alias.type_params.unwrap().params;
    assert_eq!(params[0].name, "T");
    assert!(params[0].constraint.is_some());
    assert!(params[0].default.is_some());
    assert!(matches!(alias.type_ann.kind, TsTypeKind::Fn { .. }));
}

#[test]
fn test_interface() {
    let allocator = Allocator::new();
    let source = r#"
interface Shape extends Base {
    readonly id: string;
    label?: string;
    area(scale: number): number;
}
"#;
    let result = parse_ts(&allocator, source);
    let StmtKind::TsInterface(interface) = &result.program.body[0].kind else {
        panic!("expected interface");
    };
    assert_eq!(interface.name, "Shape");
    assert_eq!(interface.extends.len(), 1);

    let members = interface.body.members;
    assert_eq!(members.len(), 3);
    assert!(matches!(
        members[0].kind,
        TsSignatureKind::Property {
            key: "id",
            readonly: true,
            optional: false,
            ..
        }
    ));
    assert!(matches!(
        members[1].kind,
        TsSignatureKind::Property {
            key: "label",
            optional: true,
            ..
        }
    ));
    assert!(matches!(
        members[2].kind,
        TsSignatureKind::Method { key: "area", params, .. } if params.len() == 1
    ));
}

#[test]
fn test_enum_and_const_enum() {
    let allocator = Allocator::new();
    let result = parse_ts(&allocator, "enum Color { Red, Green = 2 } const enum Dir { Up }");

    let StmtKind::TsEnum(color) = &result.program.body[0].kind else {
        panic!("expected enum");
    };
    assert!(!color.is_const);
    assert_eq!(color.members.len(), 2);
    assert_eq!(color.members[0].name, "Red");
    assert!(color.members[0].init.is_none());
    assert!(color.members[1].init.is_some());

    let StmtKind::TsEnum(dir) = &result.program.body[1].kind else {
        panic!("expected const enum");
    };
    assert!(dir.is_const);
}

#[test]
fn test_annotations_on_declarations() {
    let allocator = Allocator::new();
    let result = parse_ts(
        &allocator,
        "function scale<T>(v: T, by?: number): T { return v; } let xs: number[] = [];",
    );

    let StmtKind::Function(func) = &result.program.body[0].kind else {
        panic!("expected function");
    };
    assert!(func.type_params.is_some());
    assert!(func.params[0].type_ann.is_some());
    assert!(func.params[1].optional);
    assert!(func.return_type.is_some());

    let StmtKind::Var { decls, .. } = &result.program.body[1].kind else {
        unreachable!()
    };
    let ann = decls[0].type_ann.unwrap();
    assert!(matches!(ann.type_ann.kind, TsTypeKind::Array(_)));
}

#[test]
fn test_nested_generics_split_gt_gt() {
    let allocator = Allocator::new();
    let result = parse_ts(&allocator, "let m: Map<string, Array<number>> = make();");
    let StmtKind::Var { decls, .. } = &result.program.body[0].kind else {
        unreachable!()
    };
    let TsTypeKind::Ref { name, type_args } = decls[0].type_ann.unwrap().type_ann.kind else {
        panic!("expected type reference");
    };
    assert_eq!(name, "Map");
    assert_eq!(type_args.len(), 2);
    assert!(matches!(
        type_args[1].kind,
        TsTypeKind::Ref { name: "Array", type_args } if type_args.len() == 1
    ));
}

#[test]
fn test_as_expression() {
    let allocator = Allocator::new();
    let result = parse_ts(&allocator, "const n = value as unknown as number;");
    let StmtKind::Var { decls, .. } = &result.program.body[0].kind else {
        unreachable!()
    };
    let ExprKind::TsAs { expr, type_ann } = decls[0].init.unwrap().kind else {
        panic!("expected as-expression");
    };
    assert!(matches!(type_ann.kind, TsTypeKind::Ref { name: "number", .. }));
    assert!(matches!(expr.kind, ExprKind::TsAs { .. }));
}

#[test]
fn test_generic_call() {
    let allocator = Allocator::new();
    let result = parse_ts(&allocator, "const xs = make<Array<number>>(1, 2);");
    let StmtKind::Var { decls, .. } = &result.program.body[0].kind else {
        unreachable!()
    };
    assert!(matches!(
        decls[0].init.unwrap().kind,
        ExprKind::Call { args, .. } if args.len() == 2
    ));
}

#[test]
fn test_comparison_is_not_generic_call() {
    let allocator = Allocator::new();
    let result = parse_ts(&allocator, "const r = a < b;");
    let StmtKind::Var { decls, .. } = &result.program.body[0].kind else {
        unreachable!()
    };
    assert!(matches!(
        decls[0].init.unwrap().kind,
        ExprKind::Binary {
            op: BinaryOp::Lt,
            ..
        }
    ));
}

#[test]
fn test_class_with_annotated_members() {
    let allocator = Allocator::new();
    let source = "class Store<T> { items: T[] = []; get(i: number): T { return this.items[i]; } }";
    let result = parse_ts(&allocator, source);
    let StmtKind::Class(class) = &result.program.body[0].kind else {
        panic!("expected class");
    };
    assert!(class.type_params.is_some());
    assert!(matches!(
        class.body.members[0].kind,
        ClassMemberKind::Property { type_ann: Some(_), .. }
    ));
    assert!(matches!(
        class.body.members[1].kind,
        ClassMemberKind::Method { kind: MethodKind::Method, .. }
    ));
}

#[test]
fn test_interface_name_usable_in_plain_js() {
    let allocator = Allocator::new();
    // The same tokens parse as plain JavaScript when the dialect says so.
    let result = parse(&allocator, "const interface = 1;", SourceType::Module);
    assert!(result.is_valid());
}
