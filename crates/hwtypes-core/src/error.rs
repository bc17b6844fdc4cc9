/// Errors raised while resolving types or constructing values.
///
/// Type names are captured as strings so errors stay `Clone` and comparable
/// without keeping the offending types alive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Parameter has the wrong shape for the family, or the family takes none.
    #[error("invalid parameter `{param}` for {family}: {reason}")]
    InvalidParameter {
        family: String,
        param: String,
        reason: &'static str,
    },

    /// Attempt to parametrize a type that already carries a parameter.
    #[error("{0} is already sized")]
    AlreadySized(String),

    #[error("{ty} expects {expected} values, got {actual}")]
    Arity {
        ty: String,
        expected: usize,
        actual: usize,
    },

    #[error("value {value} is not of type {expected}")]
    FieldType { value: String, expected: String },

    #[error("index {index} out of range for {ty} with {len} fields")]
    IndexOutOfRange { ty: String, index: usize, len: usize },

    #[error("{ty} has no field `{field}`")]
    UnknownField { ty: String, field: String },

    /// Incoherent type definition or construction against an unbound type.
    #[error("cannot construct {ty}: {reason}")]
    Construction { ty: String, reason: String },

    /// No sum alternative (or legacy inference rule) accepts the value.
    #[error("cannot construct {ty} from {value}")]
    TypeMismatch { ty: String, value: String },

    #[error("{ty} {reason}")]
    ModifierQuery { ty: String, reason: &'static str },
}

impl Error {
    pub(crate) fn construction(ty: impl ToString, reason: impl Into<String>) -> Self {
        Self::Construction {
            ty: ty.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error belongs to the `TypeError` class: a value or type
    /// was used where its type is not accepted.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            Self::AlreadySized(_)
                | Self::FieldType { .. }
                | Self::TypeMismatch { .. }
                | Self::ModifierQuery { .. }
        )
    }
}

/// Result type for registry and value operations.
pub type Result<T> = std::result::Result<T, Error>;
