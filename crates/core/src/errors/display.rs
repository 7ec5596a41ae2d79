//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Violations(violations) => write!(f, "{violations}"),
            Error::Peek {
                source_name,
                message,
            } => {
                write!(f, "source '{source_name}' cannot peek: {message}")
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::Io { operation, source } => {
                write!(f, "failed to {operation}: {source}")
            }
        }
    }
}
