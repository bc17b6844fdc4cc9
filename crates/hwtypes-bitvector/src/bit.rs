use std::ops::{BitAnd, BitOr, BitXor, Not};

use hwtypes_core::Type;

/// Single boolean-valued unit of a backend.
///
/// Logic operators come from `std::ops`. Equality is `eq_bit` rather than
/// `PartialEq` because it returns a bit: a symbolic backend cannot decide
/// it to a host `bool`.
pub trait AbstractBit:
    Clone
    + Sized
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
{
    /// Registry type of this backend's bits; a subtype of `AbstractBit`.
    fn family() -> Type;

    fn eq_bit(&self, other: &Self) -> Self;

    fn ne_bit(&self, other: &Self) -> Self {
        !self.eq_bit(other)
    }

    /// `then` where `self` is set, `otherwise` where it is clear.
    fn ite(&self, then: &Self, otherwise: &Self) -> Self;
}
