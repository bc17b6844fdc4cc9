use std::fmt;

use crate::types::Alternative;
use crate::{Error, Result, Type, TypeKind, Value};

/// Closed tagged union value.
///
/// Holds exactly one value, which matches exactly one of the alternatives
/// declared by its type. The matching alternative is resolved once at
/// construction.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Sum {
    ty: Type,
    index: usize,
    value: Box<Value>,
}

impl Sum {
    pub fn new(ty: &Type, value: Value) -> Result<Self> {
        if ty.kind() != TypeKind::Sum {
            return Err(Error::construction(ty, "not a sum type"));
        }
        if !ty.is_sized() {
            return Err(Error::construction(ty, "cannot instance unbound sum type"));
        }

        let mut matching = ty
            .ensure_alternatives()
            .iter()
            .enumerate()
            .filter(|(_, alt)| alt.matches(&value))
            .map(|(index, _)| index);
        let (Some(index), None) = (matching.next(), matching.next()) else {
            return Err(Error::TypeMismatch {
                ty: ty.name().to_owned(),
                value: value.to_string(),
            });
        };

        Ok(Self {
            ty: ty.clone(),
            index,
            value: Box::new(value),
        })
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The alternative the stored value matched.
    pub fn alternative(&self) -> &Alternative {
        &self.ty.ensure_alternatives()[self.index]
    }

    /// Position of the matched alternative in declaration order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Matched alternative paired with the stored value, for branching.
    pub fn matched(&self) -> (&Alternative, &Value) {
        (self.alternative(), &self.value)
    }

    pub fn into_value(self) -> Value {
        *self.value
    }
}

impl fmt::Display for Sum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.ty, self.value)
    }
}
