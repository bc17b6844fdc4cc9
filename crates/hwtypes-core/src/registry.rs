//! Process-wide type registry.
//!
//! Holds the builtin roots and turns (family, parameter) pairs into canonical
//! instantiations. Each generic family owns its own instantiation cache; the
//! registry itself only owns the builtin roots and the by-name cache of
//! modifiers.

use std::sync::LazyLock;

use crate::interner::InstanceCache;
use crate::types::{Alternative, Param, Sizing, Type, TypeNode};
use crate::{Error, Result, TypeKind};

static REGISTRY: LazyLock<TypeRegistry> = LazyLock::new(TypeRegistry::new);

/// The process-wide registry.
pub fn registry() -> &'static TypeRegistry {
    &REGISTRY
}

/// Builtin roots plus the definition entry points.
pub struct TypeRegistry {
    int: Type,
    bool: Type,
    str: Type,
    bit: Type,
    bitvector: Type,
    tuple: Type,
    product: Type,
    sum: Type,
    enumeration: Type,
    pub(crate) modifiers: InstanceCache<String>,
}

fn root(name: &str, kind: TypeKind, bases: Vec<Type>) -> Type {
    Type::from_node(TypeNode::new(name.to_owned(), kind, Sizing::Unsized, bases))
}

impl TypeRegistry {
    fn new() -> Self {
        let tuple = root("Tuple", TypeKind::Tuple, vec![]);
        Self {
            int: root("int", TypeKind::Int, vec![]),
            bool: root("bool", TypeKind::Bool, vec![]),
            str: root("str", TypeKind::Str, vec![]),
            bit: root("AbstractBit", TypeKind::Bit, vec![]),
            bitvector: root("AbstractBitVector", TypeKind::BitVector, vec![]),
            product: root("Product", TypeKind::Product, vec![tuple.clone()]),
            tuple,
            sum: root("Sum", TypeKind::Sum, vec![]),
            enumeration: root("Enum", TypeKind::Enum, vec![]),
            modifiers: InstanceCache::new(),
        }
    }

    pub fn int(&self) -> &Type {
        &self.int
    }

    pub fn bool(&self) -> &Type {
        &self.bool
    }

    pub fn str(&self) -> &Type {
        &self.str
    }

    /// Root of every bit backend.
    pub fn bit(&self) -> &Type {
        &self.bit
    }

    /// Generic root of every bit-vector family.
    pub fn bitvector(&self) -> &Type {
        &self.bitvector
    }

    /// Unbound tuple root.
    pub fn tuple(&self) -> &Type {
        &self.tuple
    }

    /// Unbound product root (a subtype of the tuple root).
    pub fn product(&self) -> &Type {
        &self.product
    }

    pub fn sum(&self) -> &Type {
        &self.sum
    }

    pub fn enumeration(&self) -> &Type {
        &self.enumeration
    }

    /// Look up a builtin root by its display name.
    pub fn builtin(&self, name: &str) -> Option<&Type> {
        [
            &self.int,
            &self.bool,
            &self.str,
            &self.bit,
            &self.bitvector,
            &self.tuple,
            &self.product,
            &self.sum,
            &self.enumeration,
        ]
        .into_iter()
        .find(|ty| ty.name() == name)
    }

    /// `AbstractBitVector[width]`.
    pub fn bitvector_type(&self, width: usize) -> Result<Type> {
        let width = i64::try_from(width).map_err(|_| Error::InvalidParameter {
            family: self.bitvector.name().to_owned(),
            param: width.to_string(),
            reason: "bit-vector width is too large",
        })?;
        self.bitvector.instantiate(Param::Int(width))
    }

    /// `Tuple[fields...]`.
    pub fn tuple_type(&self, fields: &[Type]) -> Result<Type> {
        self.tuple.instantiate(Param::Types(fields.to_vec()))
    }

    /// `Sum[alternatives...]`.
    pub fn sum_type(&self, alternatives: Vec<Alternative>) -> Result<Type> {
        self.sum.instantiate(Param::Alternatives(alternatives))
    }

    /// Define a new type inheriting from `bases`.
    ///
    /// The kind comes from the non-modifier bases, which must agree. If any
    /// base is sized, the new type inherits that parameter; sized bases with
    /// different parameters are rejected here, before any instantiation.
    pub fn derive(&self, name: &str, bases: &[Type]) -> Result<Type> {
        let mut kinds = bases
            .iter()
            .map(Type::kind)
            .filter(|kind| *kind != TypeKind::Modifier);
        let Some(kind) = kinds.next() else {
            return Err(Error::construction(
                name,
                "at least one non-modifier base is required",
            ));
        };
        if let Some(other) = kinds.find(|other| *other != kind) {
            return Err(Error::construction(
                name,
                format!("cannot combine {} and {} bases", kind.name(), other.name()),
            ));
        }

        let ty = build(name.to_owned(), kind, bases.to_vec(), None)?;
        tracing::debug!(ty = %ty, sized = ty.is_sized(), "derived type");
        Ok(ty)
    }

    /// Define a named subclass of `klass`, optionally binding it at once.
    ///
    /// The subclass is a generic family in its own right, so binding it
    /// yields `name[bind]`, which is also a subtype of `klass[bind]`.
    pub fn new_type(&self, klass: &Type, name: Option<&str>, bind: Option<Param>) -> Result<Type> {
        let ty = self.derive(name.unwrap_or(klass.name()), std::slice::from_ref(klass))?;
        match bind {
            Some(param) => ty.instantiate(param),
            None => Ok(ty),
        }
    }
}

/// Create a type node, inheriting the parameter of any sized base.
pub(crate) fn build(
    name: String,
    kind: TypeKind,
    bases: Vec<Type>,
    modification: Option<(Type, Type)>,
) -> Result<Type> {
    let mut inherited: Option<&Param> = None;
    for param in bases.iter().filter_map(Type::param) {
        match inherited {
            None => inherited = Some(param),
            Some(seen) if seen != param => {
                return Err(Error::construction(
                    name,
                    format!("cannot inherit from multiple different parameters ({seen} and {param})"),
                ));
            }
            Some(_) => {}
        }
    }
    let sizing = match inherited {
        Some(param) => Sizing::Derived(param.clone()),
        None => Sizing::Unsized,
    };

    let mut node = TypeNode::new(name, kind, sizing, bases);
    node.modification = modification;
    Ok(Type::from_node(node))
}

fn invalid(family: &Type, param: &Param, reason: &'static str) -> Error {
    Error::InvalidParameter {
        family: family.name().to_owned(),
        param: param.to_string(),
        reason,
    }
}

fn validate_param(family: &Type, param: &Param) -> Result<()> {
    match (family.kind(), param) {
        (TypeKind::BitVector, Param::Int(width)) if *width < 0 => Err(invalid(
            family,
            param,
            "bit-vector width must be non-negative",
        )),
        (TypeKind::BitVector, Param::Int(_)) => Ok(()),
        (TypeKind::BitVector, _) => Err(invalid(
            family,
            param,
            "bit-vector width must be an integer",
        )),
        (TypeKind::Tuple, Param::Types(_)) => Ok(()),
        (TypeKind::Tuple, _) => Err(invalid(family, param, "tuple fields must be types")),
        (TypeKind::Product, Param::Record { fields, .. }) => {
            for (i, (name, _)) in fields.iter().enumerate() {
                if fields[..i].iter().any(|(seen, _)| seen == name) {
                    return Err(invalid(family, param, "product field names must be unique"));
                }
            }
            Ok(())
        }
        (TypeKind::Product, _) => Err(invalid(
            family,
            param,
            "product fields must be a named record",
        )),
        (TypeKind::Sum, Param::Alternatives(alts)) if alts.is_empty() => {
            Err(invalid(family, param, "sum needs at least one alternative"))
        }
        (TypeKind::Sum, Param::Alternatives(alts)) => {
            for (i, alt) in alts.iter().enumerate() {
                if alts[..i].contains(alt) {
                    return Err(invalid(family, param, "sum alternatives must be distinct"));
                }
            }
            Ok(())
        }
        (TypeKind::Sum, _) => Err(invalid(
            family,
            param,
            "sum alternatives must be an alternative list",
        )),
        _ => Err(invalid(family, param, "type is not parametric")),
    }
}

fn instance_name(family: &Type, param: &Param) -> String {
    match param {
        Param::Record { name, .. } => name.clone(),
        _ => format!("{}[{}]", family.name(), param),
    }
}

impl Type {
    /// Resolve the canonical instantiation `self[param]`.
    ///
    /// Every generic base of the same kind is instantiated with the same
    /// parameter and attached as a base of the result, so `F[p]` is a
    /// subtype of `B[p]` whenever `F` derives from `B`.
    pub fn instantiate(&self, param: Param) -> Result<Type> {
        let key = param.key();
        if let Some(existing) = self.0.instances.get(&key) {
            tracing::trace!(family = %self, %param, "instantiation cache hit");
            return Ok(existing);
        }
        validate_param(self, &param)?;
        if self.is_sized() {
            return Err(Error::AlreadySized(self.name().to_owned()));
        }

        self.0.instances.resolve_or_create(key, || {
            let mut bases = vec![self.clone()];
            for base in self.bases() {
                if base.kind() == self.kind() {
                    bases.push(base.instantiate(param.clone())?);
                }
            }
            let name = instance_name(self, &param);
            let sizing = Sizing::Instance {
                family: self.clone(),
                param,
            };
            let ty = Type::from_node(TypeNode::new(name, self.kind(), sizing, bases));
            tracing::debug!(family = %self, ty = %ty, "new instantiation");
            Ok(ty)
        })
    }
}
