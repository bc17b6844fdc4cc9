//! Bit and bit-vector algebra for hwtypes backends.
//!
//! This crate defines the operation set a concrete backend must provide:
//! - [`AbstractBit`]: a single boolean-valued unit whose comparisons yield
//!   bits, not host booleans, so they compose in symbolic contexts.
//! - [`AbstractBitVector`]: a fixed-width vector of bits with bitwise,
//!   arithmetic, shift, comparison, and width operations.
//!
//! Derived operations are default methods built from the primitives, so a
//! symbolic backend sees exactly those expressions. Every backend binds a
//! generic family in the registry and reports `family[size]` as the type of
//! its values.
//!
//! The legacy width-inference path lives in [`legacy`] and is deprecated.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod bit;
mod bitvector;
pub mod legacy;

#[cfg(test)]
mod test_utils;

/// Result of a deprecated call: the output plus the notice it raised.
///
/// Deprecated paths never fail for being deprecated; the caller decides
/// what to do with the notice.
pub type DeprecatedResult<T> = hwtypes_core::Result<(T, Deprecation)>;

pub use bit::AbstractBit;
pub use bitvector::AbstractBitVector;
pub use legacy::{Deprecation, WidthHint, WidthSource};
