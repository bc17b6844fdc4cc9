//! Type handles and descriptors.
//!
//! A [`Type`] is a cheap handle to an immutable node in the type graph.
//! Handles compare and hash by identity: two handles are equal only when
//! they point at the same node, which the registry guarantees for equal
//! (family, parameter) keys while the instantiation is alive.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use crate::TypeKind;
use crate::interner::InstanceCache;
use crate::value::{Value, ValueKey};

/// Process-unique identity of a type node.
///
/// Ids are handed out in creation order and never reused, so an evicted
/// instantiation and its replacement always have different ids.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TypeId(u64);

impl TypeId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id for debugging.
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Parameter that binds a generic family to a concrete type.
///
/// Parameters are the interning key of a family: equal parameters on the
/// same family resolve to the same canonical type.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Param {
    /// Bit-vector width.
    Int(i64),
    /// Tuple field types, in order.
    Types(Vec<Type>),
    /// Product schema: type name and ordered `(field, type)` pairs.
    Record {
        name: String,
        fields: Vec<(String, Type)>,
    },
    /// Sum alternatives, in declaration order.
    Alternatives(Vec<Alternative>),
    /// Enum constants, in declaration order.
    Constants(Vec<(String, i64)>),
}

impl Param {
    /// Width of a bit-vector parameter.
    pub fn width(&self) -> Option<usize> {
        match self {
            Self::Int(n) => usize::try_from(*n).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Types(types) => write_joined(f, types.iter()),
            Self::Record { fields, .. } => write_joined(
                f,
                fields.iter().map(|(name, ty)| format!("{name}: {ty}")),
            ),
            Self::Alternatives(alts) => write_joined(f, alts.iter()),
            Self::Constants(consts) => write_joined(
                f,
                consts.iter().map(|(name, value)| format!("{name}={value}")),
            ),
        }
    }
}

/// Interning key of a [`Param`].
///
/// Types appear by id only, so a cache entry never keeps the types named
/// by its parameter alive.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) enum ParamKey {
    Int(i64),
    Types(Vec<TypeId>),
    Record {
        name: String,
        fields: Vec<(String, TypeId)>,
    },
    Alternatives(Vec<AlternativeKey>),
    Constants(Vec<(String, i64)>),
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) enum AlternativeKey {
    Type(TypeId),
    Value(ValueKey),
}

impl Param {
    pub(crate) fn key(&self) -> ParamKey {
        match self {
            Self::Int(n) => ParamKey::Int(*n),
            Self::Types(types) => ParamKey::Types(types.iter().map(Type::id).collect()),
            Self::Record { name, fields } => ParamKey::Record {
                name: name.clone(),
                fields: fields
                    .iter()
                    .map(|(field, ty)| (field.clone(), ty.id()))
                    .collect(),
            },
            Self::Alternatives(alts) => ParamKey::Alternatives(
                alts.iter()
                    .map(|alt| match alt {
                        Alternative::Type(ty) => AlternativeKey::Type(ty.id()),
                        Alternative::Value(value) => AlternativeKey::Value(value.key()),
                    })
                    .collect(),
            ),
            Self::Constants(constants) => ParamKey::Constants(constants.clone()),
        }
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// One member of a sum's closed alternative set.
///
/// Each alternative states up front how membership is decided, so a value
/// never matches "by type or maybe by value" at runtime.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Alternative {
    /// Matches values whose runtime type is exactly this type.
    Type(Type),
    /// Matches values equal to this constant.
    Value(Value),
}

impl Alternative {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Type(ty) => value.type_of() == *ty,
            Self::Value(constant) => constant == value,
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(ty) => write!(f, "{ty}"),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}

/// Where a type sits relative to its family.
#[derive(Debug)]
pub(crate) enum Sizing {
    /// Generic family; its unsized base is itself.
    Unsized,
    /// Canonical instantiation `family[param]`.
    Instance { family: Type, param: Param },
    /// Definition that inherited its parameter from a sized base.
    Derived(Param),
}

pub(crate) struct TypeNode {
    pub(crate) id: TypeId,
    pub(crate) name: String,
    pub(crate) kind: TypeKind,
    pub(crate) sizing: Sizing,
    pub(crate) bases: Vec<Type>,
    /// `(modifier, unmodified)` for modified types.
    pub(crate) modification: Option<(Type, Type)>,
    /// Instantiations of this family, keyed by parameter.
    pub(crate) instances: InstanceCache<ParamKey>,
    /// Applications of this modifier, keyed by the unmodified type.
    pub(crate) applications: InstanceCache<TypeId>,
}

impl TypeNode {
    pub(crate) fn new(name: String, kind: TypeKind, sizing: Sizing, bases: Vec<Type>) -> Self {
        Self {
            id: TypeId::fresh(),
            name,
            kind,
            sizing,
            bases,
            modification: None,
            instances: InstanceCache::new(),
            applications: InstanceCache::new(),
        }
    }
}

/// Handle to a canonical type.
#[derive(Clone)]
pub struct Type(pub(crate) Arc<TypeNode>);

impl Type {
    pub(crate) fn from_node(node: TypeNode) -> Self {
        Self(Arc::new(node))
    }

    pub(crate) fn downgrade(&self) -> Weak<TypeNode> {
        Arc::downgrade(&self.0)
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.0.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.0.kind
    }

    /// Direct supertypes, in declaration order.
    #[inline]
    pub fn bases(&self) -> &[Type] {
        &self.0.bases
    }

    /// Whether this type carries a parameter.
    pub fn is_sized(&self) -> bool {
        !matches!(self.0.sizing, Sizing::Unsized)
    }

    pub fn param(&self) -> Option<&Param> {
        match &self.0.sizing {
            Sizing::Unsized => None,
            Sizing::Instance { param, .. } | Sizing::Derived(param) => Some(param),
        }
    }

    /// Bit-vector width, when the parameter is one.
    pub fn size(&self) -> Option<usize> {
        self.param().and_then(Param::width)
    }

    /// The generic family this type was instantiated from.
    ///
    /// A generic family is its own unsized type. Derived definitions that
    /// inherited their parameter have none.
    pub fn unsized_t(&self) -> Option<Type> {
        match &self.0.sizing {
            Sizing::Unsized => Some(self.clone()),
            Sizing::Instance { family, .. } => Some(family.clone()),
            Sizing::Derived(_) => None,
        }
    }

    /// Whether `self` is `other` or inherits from it, directly or not.
    pub fn is_subtype(&self, other: &Type) -> bool {
        self == other || self.bases().iter().any(|base| base.is_subtype(other))
    }

    /// `self` followed by every ancestor, breadth-first, without repeats.
    pub fn ancestors(&self) -> Vec<Type> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([self.clone()]);
        while let Some(ty) = queue.pop_front() {
            if !seen.insert(ty.id()) {
                continue;
            }
            queue.extend(ty.bases().iter().cloned());
            order.push(ty);
        }
        order
    }

    /// Number of live instantiations of this family.
    pub fn live_instances(&self) -> usize {
        self.0.instances.live_len()
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name(), self.id().as_u64())
    }
}
