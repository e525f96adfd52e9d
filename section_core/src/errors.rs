//! # Error Types
//!
//! Structured error types for section_core. Errors describe malformed input
//! and I/O failures. Numeric outcomes of an analysis (a load outside the
//! interaction envelope, an elastic iteration that does not converge, a
//! non-physical equilibrium) are *results*, not errors, and live in
//! [`crate::calculations::CapacityOutcome`] and
//! [`crate::calculations::ElasticOutcome`].
//!
//! ## Example
//!
//! ```rust
//! use section_core::errors::{CalcError, CalcResult};
//!
//! fn validate_height(height_m: f64) -> CalcResult<()> {
//!     if height_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "height_m",
//!             height_m.to_string(),
//!             "Section height must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for section_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for section analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, inconsistent)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// No pair of adjacent interaction points brackets the queried axial force
    #[error("No interaction bracket found for NEd = {value} kN")]
    BracketNotFound { value: f64 },

    /// Project item lookup failed
    #[error("Analysis item not found: {id}")]
    ItemNotFound { id: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an ItemNotFound error
    pub fn item_not_found(id: impl Into<String>) -> Self {
        CalcError::ItemNotFound { id: id.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Reject NaN and infinities, which would otherwise poison an integration.
    pub fn require_finite(field: &str, value: f64) -> CalcResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(CalcError::invalid_input(field, value.to_string(), "Value must be finite"))
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::BracketNotFound { .. } => "BRACKET_NOT_FOUND",
            CalcError::ItemNotFound { .. } => "ITEM_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError { reason: e.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("height_m", "-0.5", "Section height must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("reinforcements").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::BracketNotFound { value: 300.0 }.error_code(), "BRACKET_NOT_FOUND");
        assert_eq!(CalcError::item_not_found("abc").error_code(), "ITEM_NOT_FOUND");
    }

    #[test]
    fn test_require_finite() {
        assert!(CalcError::require_finite("x", 1.0).is_ok());
        assert!(CalcError::require_finite("x", f64::NAN).is_err());
        assert!(CalcError::require_finite("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_display_message() {
        let error = CalcError::BracketNotFound { value: 12.5 };
        assert_eq!(error.to_string(), "No interaction bracket found for NEd = 12.5 kN");
    }
}
