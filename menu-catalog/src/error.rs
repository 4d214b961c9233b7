use thiserror::Error;

/// A backend record could not be turned into a [`crate::Drink`].
///
/// Required fields are never defaulted: a silently-zeroed ABV or an invented base spirit would
/// corrupt category grouping.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MappingError {
    #[error("record is missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("field `{field}` is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("expected a JSON array of records")]
    NotAnArray,

    #[error("record #{index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: Box<MappingError>,
    },

    #[error("malformed record: {0}")]
    Malformed(String),
}

impl MappingError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// The offending field, looking through [`MappingError::Record`] wrappers.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field } | Self::InvalidField { field, .. } => Some(*field),
            Self::Record { source, .. } => source.field(),
            Self::NotAnObject | Self::NotAnArray | Self::Malformed(_) => None,
        }
    }
}
