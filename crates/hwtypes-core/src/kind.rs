//! Canonical type kind definitions.
//!
//! Every type in the registry belongs to exactly one kind. Derived types,
//! instantiations, and modified types inherit the kind of their base.

/// Semantic type kinds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum TypeKind {
    /// Host integer (`int`).
    Int = 0,
    /// Host boolean (`bool`).
    Bool = 1,
    /// Host string (`str`).
    Str = 2,
    /// Single boolean-valued unit of a bit backend.
    Bit = 3,
    /// Fixed-width vector of bits, parametrized by width.
    BitVector = 4,
    /// Positional heterogeneous aggregate, parametrized by field types.
    Tuple = 5,
    /// Named-field aggregate, parametrized by a field record.
    Product = 6,
    /// Closed tagged union, parametrized by its alternatives.
    Sum = 7,
    /// Closed ordered set of named integer constants.
    Enum = 8,
    /// Marker tag applied to other types.
    Modifier = 9,
}

impl TypeKind {
    /// Convert from raw discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Int),
            1 => Some(Self::Bool),
            2 => Some(Self::Str),
            3 => Some(Self::Bit),
            4 => Some(Self::BitVector),
            5 => Some(Self::Tuple),
            6 => Some(Self::Product),
            7 => Some(Self::Sum),
            8 => Some(Self::Enum),
            9 => Some(Self::Modifier),
            _ => None,
        }
    }

    /// Whether this is a host primitive (Int, Bool, Str).
    pub fn is_primitive(self) -> bool {
        matches!(self, Self::Int | Self::Bool | Self::Str)
    }

    /// Whether families of this kind accept a parameter.
    pub fn is_parametric(self) -> bool {
        matches!(
            self,
            Self::BitVector | Self::Tuple | Self::Product | Self::Sum
        )
    }

    /// Whether this is an algebraic data type kind (Tuple, Product, Sum, Enum).
    pub fn is_adt(self) -> bool {
        matches!(self, Self::Tuple | Self::Product | Self::Sum | Self::Enum)
    }

    /// Whether values of this kind are positional field sequences.
    pub fn is_tuple_like(self) -> bool {
        matches!(self, Self::Tuple | Self::Product)
    }

    /// Lowercase display name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Str => "str",
            Self::Bit => "bit",
            Self::BitVector => "bitvector",
            Self::Tuple => "tuple",
            Self::Product => "product",
            Self::Sum => "sum",
            Self::Enum => "enum",
            Self::Modifier => "modifier",
        }
    }
}
