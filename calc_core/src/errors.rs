//! # Error Types
//!
//! Structured error types for calc_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! Design outcomes such as "no equilibrium state exists" or "no bar layout
//! fits the section" are *not* errors. They are first-class results carried
//! by the solver return types and by [`crate::calculations::DesignIssue`].
//! Only I/O failures, malformed input files and contract violations end up
//! here.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_width(width_in: f64) -> CalcResult<()> {
//!     if !width_in.is_finite() {
//!         return Err(CalcError::InvalidInput {
//!             field: "width_in".to_string(),
//!             value: width_in.to_string(),
//!             reason: "Width must be a finite number".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field (or CSV column) is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A force-table record could not be parsed
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

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

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
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

    /// Create a MalformedRecord error
    pub fn malformed_record(line: usize, reason: impl Into<String>) -> Self {
        CalcError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Check whether the error is tied to a single input record.
    ///
    /// Record-level errors abort ingestion of the file, but the message
    /// points at the offending line so the table can be fixed and re-run.
    pub fn is_record_level(&self) -> bool {
        matches!(self, CalcError::MalformedRecord { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MalformedRecord { .. } => "MALFORMED_RECORD",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("width_in", "NaN", "Width must be a finite number");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("Bar").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::malformed_record(4, "bad label").error_code(), "MALFORMED_RECORD");
        assert_eq!(CalcError::serialization("eof").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_record_level_errors() {
        assert!(CalcError::malformed_record(2, "bad section").is_record_level());
        assert!(!CalcError::file_error("open", "forces.csv", "not found").is_record_level());
    }

    #[test]
    fn test_malformed_record_message_names_line() {
        let error = CalcError::malformed_record(17, "unrecognized member label '12-MAX'");
        assert!(error.to_string().contains("line 17"));
    }
}
