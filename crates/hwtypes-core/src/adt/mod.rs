//! Algebraic data type constructors.
//!
//! - [`Tuple`]: positional aggregate, bound to `Tuple[field types]`.
//! - [`Product`]: named-field aggregate, bound to a field record.
//! - [`Sum`]: closed tagged union over declared alternatives.
//! - [`EnumValue`]: constant of an enum defined with [`EnumBuilder`].
//!
//! Every constructor validates against the schema of an already resolved
//! type, so a constructed value always satisfies its type.

mod enumeration;
mod product;
mod sum;
mod tuple;

#[cfg(test)]
mod enumeration_tests;

pub use enumeration::{EnumBuilder, EnumValue};
pub use product::Product;
pub use sum::Sum;
pub use tuple::Tuple;

use crate::Type;

/// Whether `ty` belongs to the algebraic data type family.
///
/// True for the unbound roots as well as every definition and
/// instantiation derived from them.
pub fn is_adt_type(ty: &Type) -> bool {
    ty.kind().is_adt()
}
