use indoc::indoc;

use hwtypes_core::{EnumValue, Product, TypeKind, Value, get_unmodified, registry};

use super::schema::{Declared, Schema, SchemaError};
use super::schema_loader::load_schema_text;

fn declare(text: &str) -> Result<Declared, SchemaError> {
    Declared::declare(&Schema::parse(text)?)
}

fn find<'a>(declared: &'a Declared, name: &str) -> &'a hwtypes_core::Type {
    declared
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, ty)| ty)
        .unwrap()
}

#[test]
fn declares_every_kind() {
    let declared = declare(indoc! {r#"
        {"types": [
          {"name": "Word",  "kind": "bitvector", "width": 16},
          {"name": "Pair",  "kind": "tuple", "fields": ["int", "bool"]},
          {"name": "Point", "kind": "product", "fields": {"x": "Word", "y": "Word"}},
          {"name": "Op",    "kind": "enum", "constants": ["Add", {"name": "Sub", "value": 4}]},
          {"name": "Arg",   "kind": "sum", "alternatives": ["Word", "Point"]},
          {"name": "GWord", "kind": "modified", "modifier": "Global", "base": "Word"}
        ]}
    "#})
    .unwrap();

    let kinds: Vec<_> = declared.iter().map(|(_, ty)| ty.kind()).collect();
    assert_eq!(
        kinds,
        [
            TypeKind::BitVector,
            TypeKind::Tuple,
            TypeKind::Product,
            TypeKind::Enum,
            TypeKind::Sum,
            TypeKind::BitVector,
        ]
    );

    let word = find(&declared, "Word");
    assert_eq!(word.size(), Some(16));
    assert!(word.is_subtype(&registry().bitvector_type(16).unwrap()));
    assert_eq!(get_unmodified(find(&declared, "GWord")).unwrap(), *word);
}

#[test]
fn declared_types_construct_values() {
    let declared = declare(indoc! {r#"
        {"types": [
          {"name": "Flags", "kind": "product", "fields": {"on": "bool", "level": "int"}},
          {"name": "Mode",  "kind": "enum", "constants": ["Off", "On"]}
        ]}
    "#})
    .unwrap();

    let flags = Product::new(
        find(&declared, "Flags"),
        vec![Value::from(true), Value::from(3)],
    )
    .unwrap();
    let on = EnumValue::by_name(find(&declared, "Mode"), "On").unwrap();

    assert_eq!(flags.field("level"), Some(&Value::from(3)));
    assert_eq!(on.value(), 1);
}

#[test]
fn builtin_aliases() {
    let declared = declare(indoc! {r#"
        {"types": [
          {"name": "Bits", "kind": "tuple", "fields": ["Bit", "BitVector", "AbstractBit"]}
        ]}
    "#})
    .unwrap();

    let reg = registry();
    let expected = reg
        .tuple_type(&[reg.bit().clone(), reg.bitvector().clone(), reg.bit().clone()])
        .unwrap();
    assert!(find(&declared, "Bits").is_subtype(&expected));
}

#[test]
fn value_alternatives() {
    let declared = declare(indoc! {r#"
        {"types": [
          {"name": "Level", "kind": "sum", "alternatives": [{"value": 0}, {"value": "high"}, "bool"]}
        ]}
    "#})
    .unwrap();

    insta::assert_snapshot!(find(&declared, "Level").param().unwrap(), @r#"0, "high", bool"#);
}

#[test]
fn unsupported_alternative_value() {
    let err = declare(indoc! {r#"
        {"types": [
          {"name": "Ratio", "kind": "sum", "alternatives": [{"value": 1.5}]}
        ]}
    "#})
    .unwrap_err();

    insta::assert_snapshot!(err, @"Ratio: unsupported alternative value 1.5");
}

#[test]
fn unknown_type() {
    let err = declare(indoc! {r#"
        {"types": [
          {"name": "Early", "kind": "tuple", "fields": ["Late"]},
          {"name": "Late",  "kind": "bitvector", "width": 1}
        ]}
    "#})
    .unwrap_err();

    insta::assert_snapshot!(err, @"Early: unknown type `Late`");
}

#[test]
fn duplicate_names() {
    let twice = declare(indoc! {r#"
        {"types": [
          {"name": "A", "kind": "bitvector", "width": 1},
          {"name": "A", "kind": "bitvector", "width": 2}
        ]}
    "#})
    .unwrap_err();
    let shadow = declare(r#"{"types": [{"name": "int", "kind": "bitvector", "width": 1}]}"#)
        .unwrap_err();

    insta::assert_snapshot!(twice, @"type `A` is declared twice");
    assert!(matches!(shadow, SchemaError::DuplicateName(name) if name == "int"));
}

#[test]
fn registry_errors_carry_declaration_name() {
    let empty = declare(r#"{"types": [{"name": "Empty", "kind": "sum", "alternatives": []}]}"#)
        .unwrap_err();
    let strict = declare(indoc! {r#"
        {"types": [
          {"name": "Strict", "kind": "enum", "constants": [{"name": "A", "value": 2}, {"name": "B", "value": 2}], "unique": true}
        ]}
    "#})
    .unwrap_err();

    insta::assert_snapshot!(empty, @"Empty: invalid parameter `` for Sum: sum needs at least one alternative");
    insta::assert_snapshot!(strict, @"Strict: cannot construct Strict: constant `B` repeats value 2");
}

#[test]
fn malformed_json() {
    let bad_kind = declare(r#"{"types": [{"name": "V", "kind": "vector"}]}"#).unwrap_err();
    let extra = declare(r#"{"types": [], "version": 2}"#).unwrap_err();

    assert!(matches!(bad_kind, SchemaError::Json(_)));
    assert!(matches!(extra, SchemaError::Json(_)));
}

#[test]
fn loader_prefers_inline_text() {
    let text = load_schema_text(None, Some(r#"{"types": []}"#)).unwrap();
    let missing = load_schema_text(None, None).unwrap_err();
    let unreadable =
        load_schema_text(Some(std::path::Path::new("/nonexistent/types.json")), None).unwrap_err();

    assert_eq!(text, r#"{"types": []}"#);
    assert!(matches!(missing, SchemaError::MissingInput));
    assert!(matches!(unreadable, SchemaError::Io { .. }));
}
