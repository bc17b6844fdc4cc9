use std::collections::HashSet;
use std::fmt;

use crate::registry::build;
use crate::types::{Param, Sizing, Type, TypeNode};
use crate::{Error, Result, TypeKind, registry};

/// Builder for enum definitions.
///
/// Constants are either explicit (`value`) or auto-numbered (`auto`). Auto
/// constants take, in declaration order, the lowest value that is not used
/// by any other constant and is not below the successor of the previous
/// auto value. Explicit values may leave gaps or repeat; call
/// [`EnumBuilder::unique`] to reject repeated values instead.
#[derive(Clone, Debug)]
pub struct EnumBuilder {
    name: String,
    constants: Vec<(String, Option<i64>)>,
    unique: bool,
}

impl EnumBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constants: Vec::new(),
            unique: false,
        }
    }

    /// Add an auto-numbered constant.
    pub fn auto(mut self, name: impl Into<String>) -> Self {
        self.constants.push((name.into(), None));
        self
    }

    /// Add a constant with an explicit value.
    pub fn value(mut self, name: impl Into<String>, value: i64) -> Self {
        self.constants.push((name.into(), Some(value)));
        self
    }

    /// Reject definitions where two constants share a value.
    pub fn unique(mut self, value: bool) -> Self {
        self.unique = value;
        self
    }

    /// Register the enum type.
    ///
    /// Enum definitions are nominal: every call creates a new type, a
    /// subtype of the `Enum` root.
    pub fn build(self) -> Result<Type> {
        let mut names = HashSet::new();
        if let Some((dup, _)) = self
            .constants
            .iter()
            .find(|(name, _)| !names.insert(name.as_str()))
        {
            return Err(Error::construction(
                &self.name,
                format!("duplicate constant `{dup}`"),
            ));
        }

        let constants = number_constants(&self.constants);
        if self.unique {
            let mut seen = HashSet::new();
            if let Some((name, value)) = constants.iter().find(|(_, value)| !seen.insert(*value)) {
                return Err(Error::construction(
                    &self.name,
                    format!("constant `{name}` repeats value {value}"),
                ));
            }
        }

        let root = registry().enumeration().clone();
        let ty = Type::from_node(TypeNode::new(
            self.name,
            TypeKind::Enum,
            Sizing::Derived(Param::Constants(constants)),
            vec![root],
        ));
        tracing::debug!(ty = %ty, param = ?ty.param(), "enum defined");
        Ok(ty)
    }
}

fn number_constants(declared: &[(String, Option<i64>)]) -> Vec<(String, i64)> {
    let mut used: HashSet<i64> = declared.iter().filter_map(|(_, value)| *value).collect();
    let mut next = 0i64;
    declared
        .iter()
        .map(|(name, value)| {
            let value = value.unwrap_or_else(|| {
                while used.contains(&next) {
                    next += 1;
                }
                used.insert(next);
                next += 1;
                next - 1
            });
            (name.clone(), value)
        })
        .collect()
}

/// Enum constant.
///
/// Equality and hashing use `(type, value)`, so two constants declared with
/// the same value are the same constant.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct EnumValue {
    ty: Type,
    value: i64,
}

impl EnumValue {
    /// Constant of `ty` with the given value.
    pub fn new(ty: &Type, value: i64) -> Result<Self> {
        let constants = constants_of(ty)?;
        if !constants.iter().any(|(_, v)| *v == value) {
            return Err(Error::construction(
                ty,
                format!("{value} is not a declared value"),
            ));
        }
        Ok(Self {
            ty: ty.clone(),
            value,
        })
    }

    /// Constant of `ty` declared as `name`.
    pub fn by_name(ty: &Type, name: &str) -> Result<Self> {
        let constants = constants_of(ty)?;
        match constants.iter().find(|(n, _)| n == name) {
            Some((_, value)) => Ok(Self {
                ty: ty.clone(),
                value: *value,
            }),
            None => Err(Error::UnknownField {
                ty: ty.name().to_owned(),
                field: name.to_owned(),
            }),
        }
    }

    /// Every declared constant of `ty`, in declaration order.
    pub fn members(ty: &Type) -> Result<Vec<Self>> {
        Ok(constants_of(ty)?
            .iter()
            .map(|(_, value)| Self {
                ty: ty.clone(),
                value: *value,
            })
            .collect())
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Name of the first constant declared with this value.
    pub fn name(&self) -> &str {
        self.ty
            .ensure_constants()
            .iter()
            .find(|(_, value)| *value == self.value)
            .map(|(name, _)| name.as_str())
            .unwrap_or_default()
    }
}

fn constants_of(ty: &Type) -> Result<&[(String, i64)]> {
    if ty.kind() != TypeKind::Enum {
        return Err(Error::construction(ty, "not an enum type"));
    }
    if !ty.is_sized() {
        return Err(Error::construction(ty, "cannot instance unbound enum type"));
    }
    Ok(ty.ensure_constants())
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.ty, self.name())
    }
}

impl crate::TypeRegistry {
    /// Subclass an existing enum; the subclass shares its constants.
    pub fn derive_enum(&self, name: &str, base: &Type) -> Result<Type> {
        if base.kind() != TypeKind::Enum {
            return Err(Error::construction(name, "base is not an enum type"));
        }
        build(name.to_owned(), TypeKind::Enum, vec![base.clone()], None)
    }
}
