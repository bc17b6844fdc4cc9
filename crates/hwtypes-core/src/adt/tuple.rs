use std::fmt;

use crate::types::Param;
use crate::{Error, Result, Type, TypeKind, Value};

/// Positional aggregate value.
///
/// Every stored value satisfies the declared type of its field; this holds
/// after construction and after every [`Tuple::set`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Tuple {
    ty: Type,
    values: Vec<Value>,
}

impl Tuple {
    /// Construct a value of `ty`.
    ///
    /// An unbound tuple type is bound first, to the runtime types of
    /// `values`, through the registry.
    pub fn new(ty: &Type, values: Vec<Value>) -> Result<Self> {
        if !ty.kind().is_tuple_like() {
            return Err(Error::construction(ty, "not a tuple type"));
        }
        let ty = if ty.is_sized() {
            ty.clone()
        } else if ty.kind() == TypeKind::Product {
            return Err(Error::construction(ty, "cannot instance unbound product type"));
        } else {
            let inferred = values.iter().map(Value::type_of).collect();
            ty.instantiate(Param::Types(inferred))?
        };

        let fields = ty.ensure_field_types();
        if values.len() != fields.len() {
            return Err(Error::Arity {
                ty: ty.name().to_owned(),
                expected: fields.len(),
                actual: values.len(),
            });
        }
        for (value, field) in values.iter().zip(&fields) {
            check_field(value, field)?;
        }
        Ok(Self { ty, values })
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Declared field types, in order.
    pub fn field_types(&self) -> Vec<Type> {
        self.ty.ensure_field_types()
    }

    /// Replace the value at `index` after checking it against the field type.
    pub fn set(&mut self, index: usize, value: Value) -> Result<()> {
        let fields = self.ty.ensure_field_types();
        let Some(field) = fields.get(index) else {
            return Err(Error::IndexOutOfRange {
                ty: self.ty.name().to_owned(),
                index,
                len: fields.len(),
            });
        };
        check_field(&value, field)?;
        self.values[index] = value;
        Ok(())
    }

    pub(crate) fn write_values(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

pub(crate) fn check_field(value: &Value, field: &Type) -> Result<()> {
    if value.is_instance(field) {
        return Ok(());
    }
    Err(Error::FieldType {
        value: value.to_string(),
        expected: field.name().to_owned(),
    })
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.ty)?;
        self.write_values(f)?;
        f.write_str(")")
    }
}
