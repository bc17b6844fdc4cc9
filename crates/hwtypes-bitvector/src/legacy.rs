//! Deprecated width inference.
//!
//! Older callers construct bit-vectors from a bare value and let the width
//! be guessed from it. The rules, in order:
//!
//! | Source                    | Width                         |
//! |---------------------------|-------------------------------|
//! | sized bit-vector constant | its own size                  |
//! | single bit                | 1                             |
//! | sequence                  | its length, at least 1        |
//! | integer (or bool, enum)   | minimal bit length, at least 1 |
//!
//! Anything else is a `TypeMismatch`. Every successful call returns a
//! [`Deprecation`] next to its result and logs it under the
//! `hwtypes::deprecation` target.

use std::fmt;

use hwtypes_core::{Error, Param, Result, Type, TypeKind, Value};

use crate::DeprecatedResult;

/// Notice raised by a deprecated call that otherwise succeeded.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Deprecation {
    message: String,
}

impl Deprecation {
    fn raise(message: String) -> Self {
        tracing::warn!(target: "hwtypes::deprecation", "{message}");
        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Deprecation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deprecated: {}", self.message)
    }
}

/// What a value reveals about the width it should get.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum WidthHint {
    /// Already a constant of a sized bit-vector type.
    Sized(usize),
    /// A single bit.
    Bit,
    /// A sequence of this many elements.
    Sequence(usize),
    /// An integer, or something with an integer conversion.
    Int(i128),
    /// No rule applies; carries a description of the value.
    Unsupported(String),
}

/// Source of a legacy width guess.
pub trait WidthSource {
    fn width_hint(&self) -> WidthHint;
}

impl WidthSource for Value {
    fn width_hint(&self) -> WidthHint {
        match self {
            Value::Bits(bits) if bits.ty().kind() == TypeKind::Bit => WidthHint::Bit,
            Value::Bits(bits) => WidthHint::Sized(bits.len()),
            Value::Tuple(tuple) => WidthHint::Sequence(tuple.len()),
            Value::Product(product) => WidthHint::Sequence(product.len()),
            Value::Int(v) => WidthHint::Int(i128::from(*v)),
            Value::Bool(v) => WidthHint::Int(i128::from(*v)),
            Value::Enum(constant) => WidthHint::Int(i128::from(constant.value())),
            Value::Str(_) | Value::Sum(_) => WidthHint::Unsupported(self.to_string()),
        }
    }
}

impl WidthSource for i64 {
    fn width_hint(&self) -> WidthHint {
        WidthHint::Int(i128::from(*self))
    }
}

impl WidthSource for bool {
    fn width_hint(&self) -> WidthHint {
        WidthHint::Int(i128::from(*self))
    }
}

impl<const N: usize> WidthSource for [bool; N] {
    fn width_hint(&self) -> WidthHint {
        WidthHint::Sequence(N)
    }
}

impl WidthSource for Vec<bool> {
    fn width_hint(&self) -> WidthHint {
        WidthHint::Sequence(self.len())
    }
}

/// Width the legacy rules assign to `value`, for error reporting against `ty`.
pub fn infer_width(ty: &Type, value: &dyn WidthSource) -> Result<usize> {
    match value.width_hint() {
        WidthHint::Sized(n) => Ok(n),
        WidthHint::Bit => Ok(1),
        WidthHint::Sequence(len) => Ok(len.max(1)),
        WidthHint::Int(v) => Ok(bit_length(v).max(1)),
        WidthHint::Unsupported(desc) => Err(Error::TypeMismatch {
            ty: ty.name().to_owned(),
            value: desc,
        }),
    }
}

fn bit_length(v: i128) -> usize {
    (u128::BITS - v.unsigned_abs().leading_zeros()) as usize
}

/// Resolve the sized type a legacy construction of `ty` from `value` targets.
///
/// An explicit `size` skips inference. A type that is already sized is
/// returned as is, and combining it with an explicit `size` is an error.
#[deprecated(note = "instantiate the family with an explicit width")]
pub fn legacy_instantiate(
    ty: &Type,
    value: &dyn WidthSource,
    size: Option<usize>,
) -> DeprecatedResult<Type> {
    if ty.is_sized() {
        if size.is_some() {
            return Err(Error::AlreadySized(ty.name().to_owned()));
        }
        let notice = Deprecation::raise(format!(
            "legacy construction of sized type {ty}; use its canonical constructor"
        ));
        return Ok((ty.clone(), notice));
    }

    let (width, message) = match size {
        Some(width) => (width, format!("explicit size for {ty}; use {ty}[{width}]")),
        None => {
            let width = infer_width(ty, value)?;
            (width, format!("inferred width {width} for {ty}"))
        }
    };
    let width = i64::try_from(width).map_err(|_| Error::InvalidParameter {
        family: ty.name().to_owned(),
        param: width.to_string(),
        reason: "bit-vector width is too large",
    })?;
    let sized = ty.instantiate(Param::Int(width))?;
    Ok((sized, Deprecation::raise(message)))
}

/// Unsigned bit pattern of `value` for legacy constant construction.
///
/// Integers are taken in two's complement; sequences must hold single bits,
/// least significant first.
pub(crate) fn raw_bits(value: &Value) -> Result<u128> {
    let mismatch = || Error::TypeMismatch {
        ty: "AbstractBitVector".to_owned(),
        value: value.to_string(),
    };
    match value {
        Value::Int(v) => Ok(i128::from(*v) as u128),
        Value::Bool(v) => Ok(u128::from(*v)),
        Value::Bits(bits) => Ok(bits.to_u128()),
        Value::Enum(constant) => Ok(i128::from(constant.value()) as u128),
        Value::Tuple(tuple) => sequence_bits(tuple.values()).ok_or_else(mismatch),
        Value::Product(product) => sequence_bits(product.values()).ok_or_else(mismatch),
        Value::Str(_) | Value::Sum(_) => Err(mismatch()),
    }
}

fn sequence_bits(items: &[Value]) -> Option<u128> {
    items.iter().take(128).enumerate().try_fold(0, |acc, (i, item)| {
        let bit = match item {
            Value::Bool(b) => *b,
            Value::Bits(bits) if bits.len() == 1 => bits.bits()[0],
            _ => return None,
        };
        Some(acc | (u128::from(bit) << i))
    })
}
