#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core type machinery for hwtypes.
//!
//! Two layers:
//! - **Type layer**: canonical, identity-comparable [`Type`] handles produced
//!   by the [`TypeRegistry`] from generic families and parameters, plus
//!   modifier wrappers that tag types without breaking subtyping.
//! - **Value layer**: the dynamic [`Value`] model and the algebraic data type
//!   constructors ([`Tuple`], [`Product`], [`Sum`], [`EnumValue`]) that
//!   validate values against a resolved type's schema.
//!
//! All types live in one process-wide registry (see [`registry`]). Handles
//! compare by identity, so `a == b` on two [`Type`]s means "the same
//! canonical type", never "two types that happen to look alike".

pub mod adt;
mod error;
mod interner;
mod invariants;
mod kind;
mod modifier;
mod registry;
mod types;
mod value;


pub use adt::{EnumBuilder, EnumValue, Product, Sum, Tuple, is_adt_type};
pub use error::{Error, Result};
pub use kind::TypeKind;
pub use modifier::{get_modifier, get_unmodified, is_modified, is_modifier};
pub use registry::{TypeRegistry, registry};
pub use types::{Alternative, Param, Type, TypeId};
pub use value::{BitsValue, Value};
