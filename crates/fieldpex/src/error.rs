//! Error types for fieldpex.

use thiserror::Error;

/// Result type alias for fieldpex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fieldpex.
///
/// Extraction itself cannot fail; these come from configuration and from
/// rebuilding typed values out of extracted ones.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from fieldpex-core.
    #[error("Core error: {0}")]
    Core(#[from] fieldpex_core::Error),

    /// An extracted value could not be decoded back into the target type.
    #[error("Failed to rebuild {type_name}: {source}")]
    Rebuild {
        /// Name of the type being rebuilt
        type_name: &'static str,
        /// Decoding error
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Creates a rebuild error for type `T`.
    pub fn rebuild<T: ?Sized>(source: serde_json::Error) -> Self {
        Error::Rebuild {
            type_name: std::any::type_name::<T>(),
            source,
        }
    }
}
