//! Conversion implementations for error types

use super::types::Error;
use super::violation::Violations;

impl From<Violations> for Error {
    fn from(violations: Violations) -> Self {
        Error::Violations(violations)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io {
            operation: "write output".to_string(),
            source: error,
        }
    }
}
