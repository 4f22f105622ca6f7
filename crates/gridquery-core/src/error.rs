use std::error::Error as StdError;
use thiserror::Error as ThisError;

///
/// ProviderError
///
/// Opaque failure surfaced by a host-supplied collaborator (metadata
/// provider or view store). The host owns the transport; this type only
/// carries enough context to classify and log the fault.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,

    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ProviderError {
    /// Construct a provider error from a bare message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Construct a provider error wrapping an underlying transport error.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

///
/// MetadataFetchError
///
/// A remote schema call failed for one entity. Callers at the composition
/// boundary catch this and degrade; cache callers surface it.
///

#[derive(Debug, ThisError)]
#[error("metadata fetch failed for entity '{entity}': {source}")]
pub struct MetadataFetchError {
    pub entity: String,

    #[source]
    pub source: ProviderError,
}

impl MetadataFetchError {
    pub(crate) fn new(entity: impl Into<String>, source: ProviderError) -> Self {
        Self {
            entity: entity.into(),
            source,
        }
    }
}

///
/// ViewLoadError
///
/// Failure to obtain a view's raw query definition. `NotFound` is raised
/// only after both the saved and user stores report a not-found outcome;
/// any other store failure propagates as `Store`.
///

#[derive(Debug, ThisError)]
pub enum ViewLoadError {
    #[error("view '{view_id}' not found in saved or user query stores")]
    NotFound { view_id: String },

    #[error("view store failure: {0}")]
    Store(#[from] ProviderError),
}
