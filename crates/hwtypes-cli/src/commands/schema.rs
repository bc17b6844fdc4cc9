//! JSON type schemas.
//!
//! A schema is an ordered list of declarations. Each declaration names a
//! type and defines it from builtins or from earlier declarations:
//!
//! ```json
//! {"types": [
//!   {"name": "Word",  "kind": "bitvector", "width": 16},
//!   {"name": "Point", "kind": "product", "fields": {"x": "Word", "y": "Word"}},
//!   {"name": "Op",    "kind": "enum", "constants": ["Add", {"name": "Sub", "value": 4}]},
//!   {"name": "Arg",   "kind": "sum", "alternatives": ["Word", {"value": 0}]},
//!   {"name": "GWord", "kind": "modified", "modifier": "Global", "base": "Word"}
//! ]}
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use hwtypes_core::{Alternative, EnumBuilder, Type, Value, registry};

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("schema is required: use positional argument or -t/--text")]
    MissingInput,

    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{decl}: unknown type `{name}`")]
    UnknownType { decl: String, name: String },

    #[error("{decl}: unsupported alternative value {value}")]
    UnsupportedValue { decl: String, value: String },

    #[error("type `{0}` is declared twice")]
    DuplicateName(String),

    #[error("{name}: {source}")]
    Type {
        name: String,
        #[source]
        source: hwtypes_core::Error,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    pub types: Vec<Decl>,
}

#[derive(Debug, Deserialize)]
pub struct Decl {
    pub name: String,
    #[serde(flatten)]
    pub def: Def,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Def {
    Bitvector {
        width: usize,
    },
    Tuple {
        fields: Vec<String>,
    },
    Product {
        fields: IndexMap<String, String>,
    },
    Enum {
        constants: Vec<ConstantDecl>,
        #[serde(default)]
        unique: bool,
    },
    Sum {
        alternatives: Vec<AlternativeDecl>,
    },
    Modified {
        modifier: String,
        base: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ConstantDecl {
    Auto(String),
    Explicit { name: String, value: i64 },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AlternativeDecl {
    Type(String),
    Value { value: serde_json::Value },
}

impl Schema {
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Declared types, in declaration order.
#[derive(Debug, Default)]
pub struct Declared {
    types: IndexMap<String, Type>,
}

impl Declared {
    /// Resolve every declaration of `schema` through the registry.
    pub fn declare(schema: &Schema) -> Result<Self, SchemaError> {
        let mut declared = Self::default();
        for decl in &schema.types {
            if declared.types.contains_key(&decl.name) || builtin(&decl.name).is_some() {
                return Err(SchemaError::DuplicateName(decl.name.clone()));
            }
            let ty = declared.define(decl)?;
            tracing::debug!(decl = %decl.name, ty = %ty, "declared");
            declared.types.insert(decl.name.clone(), ty);
        }
        Ok(declared)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Type)> {
        self.types.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    fn define(&self, decl: &Decl) -> Result<Type, SchemaError> {
        let reg = registry();
        let name = decl.name.as_str();
        let core = |source| SchemaError::Type {
            name: name.to_owned(),
            source,
        };

        match &decl.def {
            Def::Bitvector { width } => {
                let sized = reg.bitvector_type(*width).map_err(core)?;
                reg.derive(name, &[sized]).map_err(core)
            }
            Def::Tuple { fields } => {
                let fields = fields
                    .iter()
                    .map(|field| self.resolve(name, field))
                    .collect::<Result<Vec<_>, _>>()?;
                let sized = reg.tuple_type(&fields).map_err(core)?;
                reg.derive(name, &[sized]).map_err(core)
            }
            Def::Product { fields } => {
                let fields = fields
                    .iter()
                    .map(|(field, ty)| Ok((field.clone(), self.resolve(name, ty)?)))
                    .collect::<Result<IndexMap<_, _>, SchemaError>>()?;
                reg.product_type(name, fields).map_err(core)
            }
            Def::Enum { constants, unique } => constants
                .iter()
                .fold(EnumBuilder::new(name), |builder, constant| match constant {
                    ConstantDecl::Auto(c) => builder.auto(c),
                    ConstantDecl::Explicit { name, value } => builder.value(name, *value),
                })
                .unique(*unique)
                .build()
                .map_err(core),
            Def::Sum { alternatives } => {
                let alternatives = alternatives
                    .iter()
                    .map(|alt| self.alternative(name, alt))
                    .collect::<Result<Vec<_>, _>>()?;
                let sized = reg.sum_type(alternatives).map_err(core)?;
                reg.derive(name, &[sized]).map_err(core)
            }
            Def::Modified { modifier, base } => {
                let base = self.resolve(name, base)?;
                reg.make_modifier(modifier, true).apply(&base).map_err(core)
            }
        }
    }

    fn resolve(&self, decl: &str, name: &str) -> Result<Type, SchemaError> {
        self.types
            .get(name)
            .or_else(|| builtin(name))
            .cloned()
            .ok_or_else(|| SchemaError::UnknownType {
                decl: decl.to_owned(),
                name: name.to_owned(),
            })
    }

    fn alternative(&self, decl: &str, alt: &AlternativeDecl) -> Result<Alternative, SchemaError> {
        let value = match alt {
            AlternativeDecl::Type(name) => return Ok(Alternative::Type(self.resolve(decl, name)?)),
            AlternativeDecl::Value { value } => value,
        };
        let unsupported = || SchemaError::UnsupportedValue {
            decl: decl.to_owned(),
            value: value.to_string(),
        };
        let value = match value {
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Int(n.as_i64().ok_or_else(unsupported)?),
            serde_json::Value::String(s) => Value::Str(s.clone()),
            _ => return Err(unsupported()),
        };
        Ok(Alternative::Value(value))
    }
}

/// Builtin roots by schema name.
fn builtin(name: &str) -> Option<&'static Type> {
    let reg = registry();
    match name {
        "Bit" => Some(reg.bit()),
        "BitVector" => Some(reg.bitvector()),
        _ => reg.builtin(name),
    }
}
