//! Error types for fieldpex-core.
//!
//! Permission lookup and extraction never fail; errors only arise at the
//! boundaries: parsing roles and actions from untrusted input, and loading or
//! saving configuration.

use std::path::PathBuf;

/// Errors that can occur in fieldpex-core.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An action name or code that is not one of read, write, export.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// A role name that is not present in the configured role table.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Configuration is missing or inconsistent.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error while reading a configuration file.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML configuration could not be parsed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration could not be written as TOML.
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias for fieldpex-core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidAction("delete".to_string());
        assert_eq!(err.to_string(), "Invalid action: delete");
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("date format must not be empty");
        assert_eq!(
            err.to_string(),
            "Configuration error: date format must not be empty"
        );
    }

    #[test]
    fn test_io_error_with_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io_with_path(io, "/etc/fieldpex.toml");
        assert!(err.to_string().contains("/etc/fieldpex.toml"));
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_toml_serialize_error_conversion() {
        // A bare integer is not a TOML document
        let ser_err = toml::to_string(&42u8).unwrap_err();
        let err: Error = ser_err.into();
        assert!(matches!(err, Error::TomlSerialize(_)));
        assert!(err.to_string().starts_with("TOML serialize error: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
