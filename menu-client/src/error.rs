use menu_catalog::{DrinkId, MappingError};
use thiserror::Error;

/// The request never produced a usable answer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("backend returned status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    #[error("response body is not valid JSON: {0}")]
    Body(String),
}

impl TransportError {
    /// The backend-provided detail message, when there was one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            Self::Network { .. } | Self::Body(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network { .. } | Self::Body(_) => None,
        }
    }
}

/// Failure of a catalog operation.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("drink `{id}` not found")]
    NotFound { id: DrinkId },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("backend sent an unusable record: {0}")]
    Mapping(#[from] MappingError),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
