//! Error types for configuration and topology loading.

/// Errors that can occur when loading a `memconn.toml` configuration or a
/// topology description.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading a file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The TOML or JSON content could not be parsed.
    #[error("failed to parse {0}")]
    ParseError(String),

    /// The file extension does not name a supported topology format.
    #[error("unsupported topology format '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parse_error() {
        let err = ConfigError::ParseError("memconn.toml: expected '=' at line 3".to_string());
        assert_eq!(
            format!("{err}"),
            "failed to parse memconn.toml: expected '=' at line 3"
        );
    }

    #[test]
    fn display_unsupported_format() {
        let err = ConfigError::UnsupportedFormat("xml".to_string());
        assert_eq!(
            format!("{err}"),
            "unsupported topology format 'xml' (expected .toml or .json)"
        );
    }

    #[test]
    fn display_validation_error() {
        let err = ConfigError::ValidationError("search.max_depth must be at least 1".to_string());
        assert_eq!(
            format!("{err}"),
            "validation error: search.max_depth must be at least 1"
        );
    }

    #[test]
    fn display_io_error() {
        let err = ConfigError::Io {
            path: "soc.toml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        let display = format!("{err}");
        assert!(display.starts_with("failed to read soc.toml:"));
    }
}
