//! Error types for KiCad footprint text handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for KiCad operations.
pub type KicadResult<T> = Result<T, KicadError>;

/// Errors that can occur while reading or writing `.kicad_mod` text.
#[derive(Debug, Error)]
pub enum KicadError {
    /// Failed to read the file.
    #[error("Failed to read file: {path}")]
    FileRead {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write the file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The output file exists and overwriting was not requested.
    #[error("File already exists: {path} (use --force to overwrite)")]
    AlreadyExists {
        /// Path to the existing file.
        path: PathBuf,
    },

    /// Malformed S-expression text.
    #[error("Parse error at offset {offset}: {message}")]
    ParseError {
        /// Character offset where the error occurred.
        offset: usize,
        /// Description of what's wrong.
        message: String,
    },

    /// A token that is not valid in its position.
    #[error("Unexpected token in {context}: {token}")]
    UnexpectedToken {
        /// Where the token was found.
        context: String,
        /// The offending token.
        token: String,
    },

    /// A required field is absent.
    #[error("Missing field '{field}' in {context}")]
    MissingField {
        /// Field name.
        field: String,
        /// Where the field was expected.
        context: String,
    },
}

impl KicadError {
    /// Creates a file read error.
    pub fn file_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse error.
    pub fn parse_error(offset: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            offset,
            message: message.into(),
        }
    }

    /// Creates an unexpected token error.
    pub fn unexpected_token(context: impl Into<String>, token: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            context: context.into(),
            token: token.into(),
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            context: context.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = KicadError::missing_field("at", "pad 3");
        assert_eq!(err.to_string(), "Missing field 'at' in pad 3");
    }

    #[test]
    fn already_exists_display() {
        let err = KicadError::AlreadyExists {
            path: PathBuf::from("Harwin_LTek-Male_2.kicad_mod"),
        };
        let msg = err.to_string();
        assert!(msg.contains("already exists"));
        assert!(msg.contains("--force"));
    }
}
