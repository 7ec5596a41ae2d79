//! Per-value parse and validation failures

/// Error produced when a single raw value cannot be parsed, validated or
/// applied to a parameter field.
///
/// Messages never contain the rejected input: a violation attaches the
/// value separately, after redaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// Not a number of the expected width and signedness. `bits` is zero for
    /// pointer-sized integers.
    #[error("invalid value for {}", describe_integer(*.signed, *.bits))]
    BadNumber { signed: bool, bits: u32 },

    #[error("invalid boolean value")]
    BadBool,

    #[error("value must be one of {}", .choices.join("|"))]
    NotOneOf { choices: Vec<String> },

    #[error("{message}")]
    Invalid { message: String },

    /// A static parameter was written twice
    #[error("parameter was already set")]
    AlreadySet,
}

impl ParamError {
    /// Create a free-form validation error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        ParamError::Invalid {
            message: message.into(),
        }
    }
}

fn describe_integer(signed: bool, bits: u32) -> String {
    let kind = if signed { "signed" } else { "unsigned" };
    if bits == 0 {
        format!("{kind} integer")
    } else {
        format!("{kind} {bits}-bit integer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ParamError::BadNumber { signed: false, bits: 16 }, "invalid value for unsigned 16-bit integer")]
    #[case(ParamError::BadNumber { signed: true, bits: 64 }, "invalid value for signed 64-bit integer")]
    #[case(ParamError::BadNumber { signed: true, bits: 0 }, "invalid value for signed integer")]
    #[case(ParamError::BadBool, "invalid boolean value")]
    #[case(ParamError::NotOneOf { choices: vec!["debug".into(), "info".into()] }, "value must be one of debug|info")]
    #[case(ParamError::invalid("missing host"), "missing host")]
    #[case(ParamError::AlreadySet, "parameter was already set")]
    fn test_param_error_messages(#[case] err: ParamError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }
}
