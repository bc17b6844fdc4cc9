//! Modifier markers.
//!
//! A modifier tags another type without breaking its subtype relationships:
//! `M(Base)` is a subtype of `Base`, of `M`, and of `M(A)` for every
//! ancestor `A` of `Base`. Applications are interned per modifier, so
//! applying the same modifier to the same base twice yields one handle.

use crate::registry::build;
use crate::types::{Sizing, Type, TypeNode};
use crate::{Error, Result, TypeKind, TypeRegistry};

impl TypeRegistry {
    /// Create a modifier marker named `name`.
    ///
    /// With `cache`, live modifiers are interned by name, so two calls share
    /// one marker (and therefore one set of applications). Without it every
    /// call returns a fresh marker.
    pub fn make_modifier(&self, name: &str, cache: bool) -> Type {
        let create = || {
            Type::from_node(TypeNode::new(
                name.to_owned(),
                TypeKind::Modifier,
                Sizing::Unsized,
                vec![],
            ))
        };
        if !cache {
            return create();
        }
        if let Some(existing) = self.modifiers.get(&name.to_owned()) {
            return existing;
        }
        self.modifiers.insert_if_absent(name.to_owned(), create())
    }
}

impl Type {
    /// Apply this modifier to `base`.
    pub fn apply(&self, base: &Type) -> Result<Type> {
        if !is_modifier(self) {
            return Err(Error::construction(self, "only modifiers can be applied"));
        }
        if is_modifier(base) {
            return Err(Error::construction(
                format!("{}({})", self.name(), base.name()),
                "modifiers cannot modify other modifiers",
            ));
        }
        if let Some(existing) = self.0.applications.get(&base.id()) {
            return Ok(existing);
        }

        // Built outside the cache lock: modifying ancestors re-enters it.
        let mut bases = vec![base.clone(), self.clone()];
        for ancestor in base.bases() {
            if !is_modifier(ancestor) {
                bases.push(self.apply(ancestor)?);
            }
        }
        let name = format!("{}({})", self.name(), base.name());
        let candidate = build(
            name,
            base.kind(),
            bases,
            Some((self.clone(), base.clone())),
        )?;
        let ty = self.0.applications.insert_if_absent(base.id(), candidate);
        tracing::debug!(ty = %ty, "modified type");
        Ok(ty)
    }
}

pub fn is_modifier(ty: &Type) -> bool {
    ty.kind() == TypeKind::Modifier
}

pub fn is_modified(ty: &Type) -> bool {
    ty.0.modification.is_some()
}

/// The modifier applied to `ty`.
pub fn get_modifier(ty: &Type) -> Result<Type> {
    match &ty.0.modification {
        Some((modifier, _)) => Ok(modifier.clone()),
        None => Err(not_modified(ty)),
    }
}

/// The type `ty`'s modifier was applied to.
pub fn get_unmodified(ty: &Type) -> Result<Type> {
    match &ty.0.modification {
        Some((_, unmodified)) => Ok(unmodified.clone()),
        None => Err(not_modified(ty)),
    }
}

fn not_modified(ty: &Type) -> Error {
    Error::ModifierQuery {
        ty: ty.name().to_owned(),
        reason: "is not a modified type",
    }
}
