//! Boolean-simulated backend for exercising the algebra contract.
//!
//! Semantics follow SMT-LIB fixed-size bit-vectors, including division by
//! zero (`bvudiv` yields all ones, `bvurem` the dividend).

use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::sync::LazyLock;

use hwtypes_core::{Type, registry};

use crate::{AbstractBit, AbstractBitVector};

static SIM_BIT: LazyLock<Type> = LazyLock::new(|| {
    registry()
        .derive("SimBit", &[registry().bit().clone()])
        .expect("SimBit derives from the bit root")
});

static SIM_BV: LazyLock<Type> = LazyLock::new(|| {
    registry()
        .derive("SimBitVector", &[registry().bitvector().clone()])
        .expect("SimBitVector derives from the bit-vector root")
});

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SimBit(pub bool);

impl Not for SimBit {
    type Output = Self;
    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl BitAnd for SimBit {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for SimBit {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitXor for SimBit {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl AbstractBit for SimBit {
    fn family() -> Type {
        SIM_BIT.clone()
    }

    fn eq_bit(&self, other: &Self) -> Self {
        Self(self.0 == other.0)
    }

    fn ite(&self, then: &Self, otherwise: &Self) -> Self {
        if self.0 { *then } else { *otherwise }
    }
}

/// Bit-vector of at most 64 bits held in the low bits of a `u128`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SimBv {
    width: usize,
    value: u128,
}

impl SimBv {
    pub fn value(&self) -> u128 {
        self.value
    }

    fn mask(width: usize) -> u128 {
        (1u128 << width) - 1
    }

    fn with(&self, value: u128) -> Self {
        Self::constant(self.width, value)
    }

    fn is_negative(&self) -> bool {
        self.width > 0 && self.bit(self.width - 1).0
    }

    fn signed(&self) -> i128 {
        if self.is_negative() {
            self.value as i128 - (1i128 << self.width)
        } else {
            self.value as i128
        }
    }

    fn amount(&self) -> Option<u32> {
        u32::try_from(self.value)
            .ok()
            .filter(|n| (*n as usize) < self.width)
    }
}

impl AbstractBitVector for SimBv {
    type Bit = SimBit;

    fn family() -> Type {
        SIM_BV.clone()
    }

    fn constant(width: usize, value: u128) -> Self {
        assert!(width <= 64, "SimBv supports at most 64 bits");
        Self {
            width,
            value: value & Self::mask(width),
        }
    }

    fn size(&self) -> usize {
        self.width
    }

    fn bit(&self, index: usize) -> SimBit {
        SimBit(index < self.width && (self.value >> index) & 1 == 1)
    }

    fn concat(&self, high: &Self) -> Self {
        Self::constant(self.width + high.width, self.value | (high.value << self.width))
    }

    fn repeat(&self, times: usize) -> Self {
        (0..times).fold(Self::constant(0, 0), |acc, _| acc.concat(self))
    }

    fn sext(&self, extra: usize) -> Self {
        let fill = if self.is_negative() { Self::mask(extra) } else { 0 };
        self.concat(&Self::constant(extra, fill))
    }

    fn zext(&self, extra: usize) -> Self {
        self.concat(&Self::constant(extra, 0))
    }

    fn ext(&self, extra: usize) -> Self {
        self.zext(extra)
    }

    fn bvnot(&self) -> Self {
        self.with(!self.value)
    }

    fn bvand(&self, other: &Self) -> Self {
        self.with(self.value & other.value)
    }

    fn bvor(&self, other: &Self) -> Self {
        self.with(self.value | other.value)
    }

    fn bvxor(&self, other: &Self) -> Self {
        self.with(self.value ^ other.value)
    }

    fn bvshl(&self, amount: &Self) -> Self {
        match amount.amount() {
            Some(n) => self.with(self.value << n),
            None => self.with(0),
        }
    }

    fn bvlshr(&self, amount: &Self) -> Self {
        match amount.amount() {
            Some(n) => self.with(self.value >> n),
            None => self.with(0),
        }
    }

    fn bvashr(&self, amount: &Self) -> Self {
        match amount.amount() {
            Some(n) => self.with((self.signed() >> n) as u128),
            None if self.is_negative() => self.with(u128::MAX),
            None => self.with(0),
        }
    }

    fn bvrol(&self, amount: &Self) -> Self {
        if self.width == 0 {
            return *self;
        }
        let n = (amount.value % self.width as u128) as usize;
        self.with((self.value << n) | (self.value >> ((self.width - n) % self.width)))
    }

    fn bvror(&self, amount: &Self) -> Self {
        if self.width == 0 {
            return *self;
        }
        let n = (amount.value % self.width as u128) as usize;
        self.with((self.value >> n) | (self.value << ((self.width - n) % self.width)))
    }

    fn bvcomp(&self, other: &Self) -> SimBit {
        SimBit(self.value == other.value)
    }

    fn bvult(&self, other: &Self) -> SimBit {
        SimBit(self.value < other.value)
    }

    fn bvslt(&self, other: &Self) -> SimBit {
        SimBit(self.signed() < other.signed())
    }

    fn bvneg(&self) -> Self {
        self.with(self.value.wrapping_neg())
    }

    fn bvadd(&self, other: &Self) -> Self {
        self.with(self.value.wrapping_add(other.value))
    }

    fn bvmul(&self, other: &Self) -> Self {
        self.with(self.value.wrapping_mul(other.value))
    }

    fn bvudiv(&self, other: &Self) -> Self {
        match self.value.checked_div(other.value) {
            Some(q) => self.with(q),
            None => self.with(u128::MAX),
        }
    }

    fn bvurem(&self, other: &Self) -> Self {
        match self.value.checked_rem(other.value) {
            Some(r) => self.with(r),
            None => *self,
        }
    }

    fn bvsdiv(&self, other: &Self) -> Self {
        match (self.is_negative(), other.is_negative()) {
            (false, false) => self.bvudiv(other),
            (true, false) => self.bvneg().bvudiv(other).bvneg(),
            (false, true) => self.bvudiv(&other.bvneg()).bvneg(),
            (true, true) => self.bvneg().bvudiv(&other.bvneg()),
        }
    }

    fn bvsrem(&self, other: &Self) -> Self {
        match (self.is_negative(), other.is_negative()) {
            (false, false) => self.bvurem(other),
            (true, false) => self.bvneg().bvurem(other).bvneg(),
            (false, true) => self.bvurem(&other.bvneg()),
            (true, true) => self.bvneg().bvurem(&other.bvneg()).bvneg(),
        }
    }

    fn adc(&self, other: &Self, carry: &SimBit) -> (Self, SimBit) {
        let full = self.value + other.value + u128::from(carry.0);
        (self.with(full), SimBit((full >> self.width) & 1 == 1))
    }

    fn ite(cond: &SimBit, then: &Self, otherwise: &Self) -> Self {
        if cond.0 { *then } else { *otherwise }
    }
}

/// Every 4-bit vector.
pub fn all_nibbles() -> impl Iterator<Item = SimBv> {
    (0..16).map(|v| SimBv::constant(4, v))
}
