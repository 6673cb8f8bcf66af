use super::Error;

/// Error when a model, model list, or field name does not resolve.
#[derive(Debug)]
pub(super) struct UnknownAttributeError {
    owner: Box<str>,
    name: Box<str>,
}

impl std::error::Error for UnknownAttributeError {}

impl core::fmt::Display for UnknownAttributeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "`{}` has no attribute `{}`", self.owner, self.name)
    }
}

impl Error {
    /// Creates an unknown attribute error, e.g. reading field `colour` on the
    /// `Fruit` model or looking up the `Vegetable` model on a base.
    pub fn unknown_attribute(owner: impl Into<String>, name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownAttribute(UnknownAttributeError {
            owner: owner.into().into(),
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown attribute error.
    pub fn is_unknown_attribute(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnknownAttribute(_)))
    }
}
