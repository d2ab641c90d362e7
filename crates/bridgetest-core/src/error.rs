//! Error types for the bridgetest core library
//!
//! Every operation of the boundary surface itself is infallible. The errors
//! here belong to the marshaling layer around it: converting loosely typed
//! values into native ones, dispatching calls by name, and summarising a
//! conformance run.

use thiserror::Error;

use crate::value::ValueKind;

/// Main error type for bridgetest operations
#[derive(Error, Debug)]
pub enum Error {
    /// A value of one kind was supplied where another was required
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
    },

    /// A struct value is missing one of its fields
    #[error("Struct {owner} is missing field '{field}'")]
    MissingField { owner: String, field: String },

    /// Wrong number of arguments for a surface function
    #[error("Function '{function}' takes {expected} argument(s), {found} given")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },

    /// No function of that name is part of the surface
    #[error("Unknown function: {name}")]
    UnknownFunction { name: String },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// One or more asserted conformance checks failed
    #[error("Conformance failed: {failed} of {total} checks did not hold")]
    Conformance { failed: usize, total: usize },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: ValueKind, found: ValueKind) -> Self {
        Self::TypeMismatch { expected, found }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ArityMismatch {
            function: "combo_function".to_string(),
            expected: 3,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "Function 'combo_function' takes 3 argument(s), 1 given"
        );
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = Error::type_mismatch(ValueKind::Int32, ValueKind::String);
        assert_eq!(err.to_string(), "Type mismatch: expected Int32, found String");
    }
}
