//! Error types for pad layout.

use thiserror::Error;

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors that can occur while building a connector spec or laying out pads.
///
/// A failed layout never returns partial pads.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The connector parameters violate a structural precondition.
    #[error("Invalid connector configuration: {message}")]
    Configuration {
        /// Description of what's wrong.
        message: String,
    },

    /// A two-row connector whose pin count does not split evenly.
    #[error("Pin count {pin_count} cannot be split evenly across two rows")]
    UnevenRowSplit {
        /// The offending pin count.
        pin_count: u32,
    },

    /// A dimension is zero, negative or not finite.
    #[error("Invalid dimension '{name}': {value}")]
    InvalidDimension {
        /// Dimension name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl LayoutError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an invalid dimension error.
    #[must_use]
    pub const fn invalid_dimension(name: &'static str, value: f64) -> Self {
        Self::InvalidDimension { name, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LayoutError::configuration("SMD connectors need two rows");
        assert_eq!(
            err.to_string(),
            "Invalid connector configuration: SMD connectors need two rows"
        );
    }

    #[test]
    fn uneven_split_display() {
        let err = LayoutError::UnevenRowSplit { pin_count: 7 };
        assert!(err.to_string().contains('7'));
    }
}
