//! Dynamic values held by aggregate fields and sum payloads.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::adt::{EnumValue, Product, Sum, Tuple};
use crate::{Error, Result, Type, TypeId, TypeKind, registry};

/// Constant of a bit or sized bit-vector type.
///
/// Bits are stored least significant first. This is a plain constant, not a
/// backend: it lets aggregates carry bit-vector fields without committing to
/// a simulation or symbolic representation.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct BitsValue {
    ty: Type,
    bits: Vec<bool>,
}

impl BitsValue {
    pub fn new(ty: &Type, bits: Vec<bool>) -> Result<Self> {
        let expected = match ty.kind() {
            TypeKind::Bit => 1,
            TypeKind::BitVector => ty
                .size()
                .ok_or_else(|| Error::construction(ty, "bit-vector type is unsized"))?,
            _ => return Err(Error::construction(ty, "not a bit or bit-vector type")),
        };
        if bits.len() != expected {
            return Err(Error::Arity {
                ty: ty.name().to_owned(),
                expected,
                actual: bits.len(),
            });
        }
        Ok(Self {
            ty: ty.clone(),
            bits,
        })
    }

    /// Constant from the low bits of `value`; higher bits are discarded.
    pub fn from_u128(ty: &Type, value: u128) -> Result<Self> {
        let width = match ty.kind() {
            TypeKind::Bit => 1,
            _ => ty.size().unwrap_or(0),
        };
        let bits = (0..width)
            .map(|i| i < 128 && (value >> i) & 1 == 1)
            .collect();
        Self::new(ty, bits)
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Unsigned value of the low 128 bits.
    pub fn to_u128(&self) -> u128 {
        self.bits
            .iter()
            .take(128)
            .enumerate()
            .fold(0, |acc, (i, bit)| acc | (u128::from(*bit) << i))
    }
}

impl fmt::Display for BitsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0b")?;
        for bit in self.bits.iter().rev() {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Self-contained value with a runtime type.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
    Bits(BitsValue),
    Tuple(Tuple),
    Product(Product),
    Sum(Sum),
    Enum(EnumValue),
}

impl Value {
    /// Runtime type of the value.
    pub fn type_of(&self) -> Type {
        let reg = registry();
        match self {
            Self::Int(_) => reg.int().clone(),
            Self::Bool(_) => reg.bool().clone(),
            Self::Str(_) => reg.str().clone(),
            Self::Bits(bits) => bits.ty().clone(),
            Self::Tuple(tuple) => tuple.ty().clone(),
            Self::Product(product) => product.ty().clone(),
            Self::Sum(sum) => sum.ty().clone(),
            Self::Enum(constant) => constant.ty().clone(),
        }
    }

    /// Whether the value's runtime type is `ty` or a subtype of it.
    pub fn is_instance(&self, ty: &Type) -> bool {
        self.type_of().is_subtype(ty)
    }
}

/// Interning key of a [`Value`]: its structure, with types by id.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) enum ValueKey {
    Int(i64),
    Bool(bool),
    Str(String),
    Bits(TypeId, Vec<bool>),
    Fields(TypeId, Vec<ValueKey>),
    Sum(TypeId, Box<ValueKey>),
    Enum(TypeId, i64),
}

impl Value {
    pub(crate) fn key(&self) -> ValueKey {
        let fields = |ty: &Type, values: &[Value]| {
            ValueKey::Fields(ty.id(), values.iter().map(Value::key).collect())
        };
        match self {
            Self::Int(v) => ValueKey::Int(*v),
            Self::Bool(v) => ValueKey::Bool(*v),
            Self::Str(v) => ValueKey::Str(v.clone()),
            Self::Bits(bits) => ValueKey::Bits(bits.ty().id(), bits.bits().to_vec()),
            Self::Tuple(tuple) => fields(tuple.ty(), tuple.values()),
            Self::Product(product) => fields(product.ty(), product.values()),
            Self::Sum(sum) => ValueKey::Sum(sum.ty().id(), Box::new(sum.value().key())),
            Self::Enum(constant) => ValueKey::Enum(constant.ty().id(), constant.value()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<BitsValue> for Value {
    fn from(v: BitsValue) -> Self {
        Self::Bits(v)
    }
}

impl From<Tuple> for Value {
    fn from(v: Tuple) -> Self {
        Self::Tuple(v)
    }
}

impl From<Product> for Value {
    fn from(v: Product) -> Self {
        Self::Product(v)
    }
}

impl From<Sum> for Value {
    fn from(v: Sum) -> Self {
        Self::Sum(v)
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Self::Enum(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
            Self::Bits(v) => write!(f, "{v}"),
            Self::Tuple(v) => write!(f, "{v}"),
            Self::Product(v) => write!(f, "{v}"),
            Self::Sum(v) => write!(f, "{v}"),
            Self::Enum(v) => write!(f, "{v}"),
        }
    }
}

/// Serialization for tooling.
///
/// Tuples become sequences, products ordered maps, sums `{"$tag", "$data"}`
/// objects, enums their constant name, and bit constants `0b…` strings.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Str(v) => serializer.serialize_str(v),
            Value::Bits(bits) => serializer.collect_str(bits),
            Value::Tuple(tuple) => {
                let mut seq = serializer.serialize_seq(Some(tuple.len()))?;
                for item in tuple.values() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Product(product) => {
                let mut map = serializer.serialize_map(Some(product.len()))?;
                for (name, value) in product.fields() {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            Value::Sum(sum) => {
                let (tag, data) = sum.matched();
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("$tag", &tag.to_string())?;
                map.serialize_entry("$data", data)?;
                map.end()
            }
            Value::Enum(constant) => serializer.serialize_str(constant.name()),
        }
    }
}
