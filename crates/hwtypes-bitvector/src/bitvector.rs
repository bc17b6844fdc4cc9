use hwtypes_core::{Error, Param, Result, Type, TypeKind, Value};

use crate::legacy::{self, Deprecation};
use crate::{AbstractBit, DeprecatedResult};

/// Fixed-width vector of bits.
///
/// Operands of binary operations have the same width as `self`; shift and
/// rotate amounts are read as unsigned vectors of that width. Results keep
/// the width of `self` unless the operation says otherwise.
///
/// The provided methods are part of the contract: backends may override
/// them only with definitions that build the same expression.
pub trait AbstractBitVector: Clone + Sized {
    type Bit: AbstractBit;

    /// Generic registry family of this backend; a subtype of
    /// `AbstractBitVector`.
    fn family() -> Type;

    /// Constant of `width` bits from the low bits of `value`.
    fn constant(width: usize, value: u128) -> Self;

    fn size(&self) -> usize;

    /// Bit `index`, counting from the least significant.
    fn bit(&self, index: usize) -> Self::Bit;

    /// `self` in the low bits, `high` above it.
    fn concat(&self, high: &Self) -> Self;

    /// `self` concatenated `times` times.
    fn repeat(&self, times: usize) -> Self;

    /// Sign-extend by `extra` bits.
    fn sext(&self, extra: usize) -> Self;

    /// Zero-extend by `extra` bits.
    fn zext(&self, extra: usize) -> Self;

    /// Extend by `extra` bits the backend's default way.
    fn ext(&self, extra: usize) -> Self;

    fn bvnot(&self) -> Self;
    fn bvand(&self, other: &Self) -> Self;
    fn bvor(&self, other: &Self) -> Self;
    fn bvxor(&self, other: &Self) -> Self;

    fn bvshl(&self, amount: &Self) -> Self;
    fn bvlshr(&self, amount: &Self) -> Self;
    fn bvashr(&self, amount: &Self) -> Self;
    fn bvrol(&self, amount: &Self) -> Self;
    fn bvror(&self, amount: &Self) -> Self;

    /// Equality collapsed to one bit.
    fn bvcomp(&self, other: &Self) -> Self::Bit;
    fn bvult(&self, other: &Self) -> Self::Bit;
    fn bvslt(&self, other: &Self) -> Self::Bit;

    fn bvneg(&self) -> Self;
    fn bvadd(&self, other: &Self) -> Self;
    fn bvmul(&self, other: &Self) -> Self;
    fn bvudiv(&self, other: &Self) -> Self;
    fn bvurem(&self, other: &Self) -> Self;
    fn bvsdiv(&self, other: &Self) -> Self;
    fn bvsrem(&self, other: &Self) -> Self;

    /// Add with carry: `self + other + carry` and the carry out.
    fn adc(&self, other: &Self, carry: &Self::Bit) -> (Self, Self::Bit);

    fn ite(cond: &Self::Bit, then: &Self, otherwise: &Self) -> Self;

    fn bvnand(&self, other: &Self) -> Self {
        self.bvand(other).bvnot()
    }

    fn bvnor(&self, other: &Self) -> Self {
        self.bvor(other).bvnot()
    }

    fn bvxnor(&self, other: &Self) -> Self {
        self.bvxor(other).bvnot()
    }

    fn bveq(&self, other: &Self) -> Self::Bit {
        self.bvcomp(other)
    }

    fn bvne(&self, other: &Self) -> Self::Bit {
        !self.bvcomp(other)
    }

    fn bvule(&self, other: &Self) -> Self::Bit {
        self.bvult(other) | self.bvcomp(other)
    }

    fn bvugt(&self, other: &Self) -> Self::Bit {
        !self.bvule(other)
    }

    fn bvuge(&self, other: &Self) -> Self::Bit {
        !self.bvult(other)
    }

    fn bvsle(&self, other: &Self) -> Self::Bit {
        self.bvslt(other) | self.bvcomp(other)
    }

    fn bvsgt(&self, other: &Self) -> Self::Bit {
        !self.bvsle(other)
    }

    fn bvsge(&self, other: &Self) -> Self::Bit {
        !self.bvslt(other)
    }

    fn bvsub(&self, other: &Self) -> Self {
        self.bvadd(&other.bvneg())
    }

    /// Canonical type of this value: `family[size]`.
    fn concrete_type(&self) -> Result<Type> {
        let width = i64::try_from(self.size()).unwrap_or(i64::MAX);
        Self::family().instantiate(Param::Int(width))
    }

    /// Construct a value of the sized type `ty`.
    ///
    /// `ty` must be a sized bit-vector type within this backend's family.
    fn from_type(ty: &Type, value: u128) -> Result<Self> {
        if ty.kind() != TypeKind::BitVector || !ty.is_subtype(&Self::family()) {
            return Err(Error::Construction {
                ty: ty.name().to_owned(),
                reason: format!("not a {} type", Self::family()),
            });
        }
        let Some(width) = ty.size() else {
            return Err(Error::Construction {
                ty: ty.name().to_owned(),
                reason: "cannot instance unsized bit-vector type".to_owned(),
            });
        };
        Ok(Self::constant(width, value))
    }

    /// Construct from a dynamic value, inferring the width unless `size`
    /// is given.
    #[deprecated(note = "instantiate the family and use `from_type` instead")]
    fn new_inferred(value: &Value, size: Option<usize>) -> DeprecatedResult<Self> {
        #[allow(deprecated)]
        let (ty, notice): (Type, Deprecation) =
            legacy::legacy_instantiate(&Self::family(), value, size)?;
        let raw = legacy::raw_bits(value)?;
        Ok((Self::from_type(&ty, raw)?, notice))
    }
}
