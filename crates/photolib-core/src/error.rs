//! Catalog error handling
//!
//! Provides typed errors for catalog operations. Each variant carries
//! enough context for the caller to decide between the soft-fail and
//! hard-fail propagation paths.

use thiserror::Error;

/// Errors that can occur while talking to or validating against the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Transport or auth failure reaching the object store
    #[error("catalog unavailable: {source}")]
    Unavailable {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The requested object does not exist in the catalog
    #[error("object not found: '{key}'")]
    ObjectNotFound { key: String },

    /// A catalog entry is malformed (e.g. missing key)
    #[error("invalid catalog entry: {reason}")]
    InvalidEntry { reason: String },

    /// A selected file has a MIME type the library does not accept
    #[error("'{file_name}' has unsupported type '{content_type}'. Only JPG and PNG files are allowed.")]
    UnsupportedFileType {
        file_name: String,
        content_type: String,
    },

    /// The catalog holds no entries (random pick on an empty library)
    #[error("no images available")]
    EmptyLibrary,
}

impl CatalogError {
    /// Wrap a transport-level error as `Unavailable`
    pub fn unavailable<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CatalogError::Unavailable {
            source: Box::new(source),
        }
    }

    /// Create an `InvalidEntry` error with a reason
    pub fn invalid_entry(reason: impl Into<String>) -> Self {
        CatalogError::InvalidEntry {
            reason: reason.into(),
        }
    }

    /// Whether the caller may recover by presenting an empty library
    ///
    /// Only listing-path `Unavailable` errors are soft-failed; everything
    /// else propagates.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CatalogError::Unavailable { .. })
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
