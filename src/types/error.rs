//! Error types for the rental desk
//!
//! This module defines all error types that can occur while loading, validating
//! and persisting records. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: permission denied, disk full, failed rename, etc.
//! - **CSV Parsing Errors**: malformed rows, unparsable numbers or dates
//! - **Lookup Errors**: unknown vehicle or rental id, duplicate keys
//! - **Validation Errors**: empty required fields, malformed operator input
//!
//! A missing backing file is not an error: loading a
//! collection whose file does not exist yields an empty collection.

use thiserror::Error;

/// Main error type for the rental desk
///
/// Each variant includes enough context to be shown to an operator as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RentalError {
    /// I/O error occurred while reading or writing a collection file
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A stored row could not be parsed
    ///
    /// Fails the whole load of the collection.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Referenced record does not exist
    #[error("{collection} record '{key}' not found")]
    NotFound {
        /// Collection that was searched
        collection: String,
        /// Identity key that was not found
        key: String,
    },

    /// A record with the same identity key already exists
    #[error("{collection} record '{key}' already exists")]
    DuplicateKey {
        /// Collection holding the existing record
        collection: String,
        /// The duplicated identity key
        key: String,
    },

    /// A required field is empty or malformed
    ///
    /// Raised at the input boundary; records are never mutated with invalid data.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// A value could not be interpreted for the given field
    #[error("Invalid value '{value}' for {field}")]
    InvalidValue {
        /// Name of the field
        field: String,
        /// The rejected text
        value: String,
    },

    /// The vehicle is already rented out
    #[error("Vehicle {vehicle_id} is currently not available")]
    VehicleUnavailable {
        /// Vehicle that was requested
        vehicle_id: String,
    },

    /// Username/password pair did not match any account
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },
}

// Conversion from io::Error to RentalError
impl From<std::io::Error> for RentalError {
    fn from(error: std::io::Error) -> Self {
        RentalError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to RentalError
impl From<csv::Error> for RentalError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        RentalError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<tempfile::PersistError> for RentalError {
    fn from(error: tempfile::PersistError) -> Self {
        error.error.into()
    }
}

// Helper functions for creating common errors

impl RentalError {
    /// Create a NotFound error
    pub fn not_found(collection: &str, key: &str) -> Self {
        RentalError::NotFound {
            collection: collection.to_string(),
            key: key.to_string(),
        }
    }

    /// Create a DuplicateKey error
    pub fn duplicate_key(collection: &str, key: &str) -> Self {
        RentalError::DuplicateKey {
            collection: collection.to_string(),
            key: key.to_string(),
        }
    }

    /// Create a Validation error
    pub fn validation(field: &str, message: &str) -> Self {
        RentalError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a Validation error for an empty required field
    pub fn required(field: &str) -> Self {
        Self::validation(field, "field is required")
    }

    /// Create an InvalidValue error
    pub fn invalid_value(field: &str, value: &str) -> Self {
        RentalError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a VehicleUnavailable error
    pub fn vehicle_unavailable(vehicle_id: &str) -> Self {
        RentalError::VehicleUnavailable {
            vehicle_id: vehicle_id.to_string(),
        }
    }

    /// Create a ConfigError
    pub fn config(message: impl Into<String>) -> Self {
        RentalError::ConfigError {
            message: message.into(),
        }
    }

    /// Attach a line number to a row-level error raised while loading
    pub fn at_line(self, line: u64) -> Self {
        match self {
            RentalError::ParseError { line: None, message } => RentalError::ParseError {
                line: Some(line),
                message,
            },
            RentalError::ParseError { .. } => self,
            other => RentalError::ParseError {
                line: Some(line),
                message: other.to_string(),
            },
        }
    }
}
