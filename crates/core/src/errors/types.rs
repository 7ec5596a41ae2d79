//! Core error type definitions

use super::violation::Violations;

/// Result type alias for hotparam operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for hotparam operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more parameters are missing or invalid
    Violations(#[source] Violations),

    /// A source asked for a value it is not allowed to read
    Peek {
        source_name: String,
        message: String,
    },

    /// Configuration errors
    Configuration { message: String },

    /// I/O failures while rendering usage, dumps or diagnostics
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// The violations carried by this error, if any
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Error::Violations(violations) => Some(violations),
            _ => None,
        }
    }
}
