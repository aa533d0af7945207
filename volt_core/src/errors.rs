//! # Error Types
//!
//! Structured error types for volt_core. Every failure in the engine is
//! local-recoverable: a field is marked invalid, a lookup misses, a result
//! comes out non-finite. Nothing here is fatal and nothing panics.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::errors::{CalcError, CalcResult};
//!
//! fn validate_voltage(volts: f64) -> CalcResult<()> {
//!     if volts <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "system_voltage",
//!             volts.to_string(),
//!             "Voltage must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for volt_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// One invalid field, as reported by schema validation.
///
/// A single evaluation can produce several of these (one per bad field),
/// so they travel as a list inside [`CalcError::Validation`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldIssue {
    /// Schema field name (e.g., "transformer_kva")
    pub field: String,
    /// The offending value as entered
    pub value: String,
    /// Human-readable message suitable for inline display
    pub message: String,
}

impl FieldIssue {
    pub fn new(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        FieldIssue {
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Structured error type for estimator evaluation.
///
/// Each variant carries enough context to recover programmatically:
/// which calculator, which field, which table key.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// No calculator registered under the given slug
    #[error("Unknown calculator: '{slug}'")]
    UnknownCalculator { slug: String },

    /// One or more input fields failed schema validation
    #[error("Invalid input ({} field(s))", .issues.len())]
    Validation { issues: Vec<FieldIssue> },

    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing from the input record
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A reference-table lookup found no entry for the given key
    #[error("No entry in {table} table for key: {key}")]
    LookupMiss { table: String, key: String },

    /// A transform produced a non-finite number (division blow-up etc.)
    #[error("Result '{field}' is not a finite number")]
    NonFinite { field: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
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

    /// Create an UnknownCalculator error
    pub fn unknown_calculator(slug: impl Into<String>) -> Self {
        CalcError::UnknownCalculator { slug: slug.into() }
    }

    /// Create a LookupMiss error
    pub fn lookup_miss(table: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::LookupMiss {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create a NonFinite error
    pub fn non_finite(field: impl Into<String>) -> Self {
        CalcError::NonFinite {
            field: field.into(),
        }
    }

    /// Wrap a list of field issues from schema validation
    pub fn validation(issues: Vec<FieldIssue>) -> Self {
        CalcError::Validation { issues }
    }

    /// True for errors that the form layer resolves by marking fields,
    /// rather than reporting a programming mistake.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::Validation { .. }
                | CalcError::InvalidInput { .. }
                | CalcError::MissingField { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::UnknownCalculator { .. } => "UNKNOWN_CALCULATOR",
            CalcError::Validation { .. } => "VALIDATION",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::LookupMiss { .. } => "LOOKUP_MISS",
            CalcError::NonFinite { .. } => "NON_FINITE",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}
