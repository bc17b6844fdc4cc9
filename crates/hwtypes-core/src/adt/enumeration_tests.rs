use crate::{EnumBuilder, EnumValue, Error, Param, Value, registry};

#[test]
fn auto_numbering() {
    let ty = EnumBuilder::new("Abc").auto("A").auto("B").auto("C").build().unwrap();

    let values: Vec<_> = EnumValue::members(&ty)
        .unwrap()
        .iter()
        .map(|c| (c.name().to_owned(), c.value()))
        .collect();

    assert_eq!(
        values,
        [("A".to_owned(), 0), ("B".to_owned(), 1), ("C".to_owned(), 2)]
    );
    assert_eq!(EnumValue::new(&ty, 0).unwrap().name(), "A");
}

#[test]
fn auto_skips_explicit_values() {
    let ty = EnumBuilder::new("Skip")
        .auto("A")
        .value("B", 1)
        .auto("C")
        .value("D", 7)
        .auto("E")
        .build()
        .unwrap();

    insta::assert_snapshot!(ty.param().unwrap(), @"A=0, B=1, C=2, D=7, E=3");
}

#[test]
fn auto_continues_after_previous_auto() {
    let ty = EnumBuilder::new("Continue")
        .value("A", 5)
        .auto("B")
        .value("C", 0)
        .auto("D")
        .build()
        .unwrap();

    insta::assert_snapshot!(ty.param().unwrap(), @"A=5, B=1, C=0, D=2");
}

#[test]
fn permissive_aliases_values() {
    let ty = EnumBuilder::new("Alias")
        .value("On", 1)
        .value("Enabled", 1)
        .build()
        .unwrap();

    let on = EnumValue::by_name(&ty, "On").unwrap();
    let enabled = EnumValue::by_name(&ty, "Enabled").unwrap();

    assert_eq!(on, enabled);
    assert_eq!(enabled.name(), "On");
    insta::assert_snapshot!(enabled, @"Alias.On");
}

#[test]
fn unique_rejects_repeated_values() {
    let err = EnumBuilder::new("Strict")
        .value("On", 1)
        .value("Enabled", 1)
        .unique(true)
        .build()
        .unwrap_err();

    insta::assert_snapshot!(err, @"cannot construct Strict: constant `Enabled` repeats value 1");
}

#[test]
fn unique_accepts_distinct_values() {
    let ty = EnumBuilder::new("StrictOk")
        .auto("A")
        .value("B", 3)
        .unique(true)
        .build();

    assert!(ty.is_ok());
}

#[test]
fn duplicate_names_rejected() {
    let err = EnumBuilder::new("Twice")
        .auto("A")
        .auto("A")
        .build()
        .unwrap_err();

    insta::assert_snapshot!(err, @"cannot construct Twice: duplicate constant `A`");
}

#[test]
fn enums_are_nominal() {
    let reg = registry();
    let a = EnumBuilder::new("Nominal").auto("X").build().unwrap();
    let b = EnumBuilder::new("Nominal").auto("X").build().unwrap();

    assert_ne!(a, b);
    assert_ne!(
        EnumValue::new(&a, 0).unwrap(),
        EnumValue::new(&b, 0).unwrap()
    );
    assert!(a.is_subtype(reg.enumeration()));
    assert!(matches!(a.param(), Some(Param::Constants(_))));
}

#[test]
fn undeclared_value_rejected() {
    let ty = EnumBuilder::new("Sparse").value("A", 2).build().unwrap();

    let err = EnumValue::new(&ty, 3).unwrap_err();
    let name = EnumValue::by_name(&ty, "B").unwrap_err();
    let root = EnumValue::new(registry().enumeration(), 0).unwrap_err();

    insta::assert_snapshot!(err, @"cannot construct Sparse: 3 is not a declared value");
    assert!(matches!(name, Error::UnknownField { .. }));
    insta::assert_snapshot!(root, @"cannot construct Enum: cannot instance unbound enum type");
}

#[test]
fn derived_enum_shares_constants() {
    let reg = registry();
    let base = EnumBuilder::new("BaseOp").auto("Add").auto("Sub").build().unwrap();

    let derived = reg.derive_enum("DerivedOp", &base).unwrap();
    let sub = EnumValue::by_name(&derived, "Sub").unwrap();

    assert!(derived.is_subtype(&base));
    assert_eq!(sub.value(), 1);
    assert!(Value::from(sub).is_instance(&base));
    assert!(reg.derive_enum("NotEnum", reg.int()).is_err());
}

#[test]
fn enum_cannot_be_parametrized() {
    let ty = EnumBuilder::new("Fixed").auto("A").build().unwrap();

    let err = ty.instantiate(Param::Int(1)).unwrap_err();

    assert!(matches!(err, Error::InvalidParameter { .. }));
}
