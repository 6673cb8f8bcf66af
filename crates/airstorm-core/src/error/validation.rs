use super::Error;

/// Error when caller input violates the shape the schema imposes.
#[derive(Debug)]
pub(super) struct ValidationError {
    pub(super) kind: ValidationErrorKind,
}

#[derive(Debug)]
pub(super) enum ValidationErrorKind {
    /// A model list received a member of another model type
    ModelTypeMismatch { expected: Box<str>, actual: Box<str> },

    /// A positional field list write received the wrong number of values
    LengthMismatch { expected: usize, actual: usize },

    /// A formula or computation column was written
    ReadOnlyField { field: Box<str> },

    /// An edit was staged on the empty sentinel instance
    UnboundRecord { model: Box<str> },
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use ValidationErrorKind::*;

        match &self.kind {
            ModelTypeMismatch { expected, actual } => write!(
                f,
                "{expected} list can only hold {expected} records, got a record of {actual}"
            ),
            LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} values but got {actual}")
            }
            ReadOnlyField { field } => write!(f, "{field} is a read only field"),
            UnboundRecord { model } => {
                write!(f, "cannot edit an empty {model} record")
            }
        }
    }
}

impl Error {
    pub fn model_type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Error {
        validation(ValidationErrorKind::ModelTypeMismatch {
            expected: expected.into().into(),
            actual: actual.into().into(),
        })
    }

    pub fn length_mismatch(expected: usize, actual: usize) -> Error {
        validation(ValidationErrorKind::LengthMismatch { expected, actual })
    }

    pub fn read_only_field(field: impl Into<String>) -> Error {
        validation(ValidationErrorKind::ReadOnlyField {
            field: field.into().into(),
        })
    }

    pub fn unbound_record(model: impl Into<String>) -> Error {
        validation(ValidationErrorKind::UnboundRecord {
            model: model.into().into(),
        })
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Validation(_)))
    }
}

fn validation(kind: ValidationErrorKind) -> Error {
    Error::from(super::ErrorKind::Validation(ValidationError { kind }))
}
