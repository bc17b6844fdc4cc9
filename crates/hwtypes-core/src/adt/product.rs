use std::fmt;
use std::ops::Deref;

use indexmap::IndexMap;

use super::Tuple;
use crate::types::Param;
use crate::{Error, Result, Type, TypeKind, TypeRegistry, Value};

impl TypeRegistry {
    /// Declare a product type from an ordered name→type mapping.
    ///
    /// The result is canonical for `(name, fields)`: declaring the same
    /// schema again returns the same type while it is alive.
    pub fn product_type(&self, name: &str, fields: IndexMap<String, Type>) -> Result<Type> {
        self.product().instantiate(Param::Record {
            name: name.to_owned(),
            fields: fields.into_iter().collect(),
        })
    }
}

/// Named-field aggregate value.
///
/// A [`Tuple`] whose fields also have names; positional access goes through
/// `Deref`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Product(Tuple);

impl Product {
    /// Construct from values in declaration order.
    pub fn new(ty: &Type, values: Vec<Value>) -> Result<Self> {
        if ty.kind() != TypeKind::Product {
            return Err(Error::construction(ty, "not a product type"));
        }
        Tuple::new(ty, values).map(Self)
    }

    /// Construct from a name→value mapping; every field must be given once.
    pub fn from_fields(ty: &Type, mut fields: IndexMap<String, Value>) -> Result<Self> {
        if ty.kind() != TypeKind::Product || !ty.is_sized() {
            return Self::new(ty, Vec::new());
        }
        let schema = ty.ensure_record();
        if let Some(extra) = fields
            .keys()
            .find(|name| !schema.iter().any(|(field, _)| field == *name))
        {
            return Err(Error::UnknownField {
                ty: ty.name().to_owned(),
                field: extra.clone(),
            });
        }
        let supplied = fields.len();
        let mut values = Vec::with_capacity(schema.len());
        for (name, _) in schema {
            let Some(value) = fields.shift_remove(name) else {
                return Err(Error::Arity {
                    ty: ty.name().to_owned(),
                    expected: schema.len(),
                    actual: supplied,
                });
            };
            values.push(value);
        }
        Self::new(ty, values)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.ty().ensure_record().iter().map(|(name, _)| name.as_str())
    }

    /// `(name, value)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.field_names().zip(self.0.values())
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.position(name).and_then(|index| self.0.get(index))
    }

    pub fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        let Some(index) = self.position(name) else {
            return Err(Error::UnknownField {
                ty: self.ty().name().to_owned(),
                field: name.to_owned(),
            });
        };
        self.0.set(index, value)
    }

    /// Positional assignment, validated like [`Tuple::set`].
    pub fn set(&mut self, index: usize, value: Value) -> Result<()> {
        self.0.set(index, value)
    }

    /// Copy of the fields as an ordered map.
    pub fn value_dict(&self) -> IndexMap<String, Value> {
        self.fields()
            .map(|(name, value)| (name.to_owned(), value.clone()))
            .collect()
    }

    pub fn into_tuple(self) -> Tuple {
        self.0
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.field_names().position(|field| field == name)
    }
}

impl Deref for Product {
    type Target = Tuple;

    fn deref(&self) -> &Tuple {
        &self.0
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ ", self.ty())?;
        for (i, (name, value)) in self.fields().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str(" }")
    }
}
