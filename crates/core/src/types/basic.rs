//! Parsing contract for statically typed parameters

use crate::errors::ParamError;
use std::fmt::Display;

/// A primitive type that can be parsed from and formatted to a raw
/// parameter value.
pub trait BasicType: Clone + Send + Sync + 'static {
    /// Type label shown in usage text
    const TYPE_NAME: &'static str;

    /// Boolean parameters accept the bare `-flag` syntax
    const IS_BOOLEAN: bool = false;

    fn parse_param(raw: &str) -> Result<Self, ParamError>;

    fn format_param(&self) -> String;
}

/// Integer types usable as parameters
pub trait Integer: BasicType + Copy + Display {}

impl BasicType for String {
    const TYPE_NAME: &'static str = "string";

    fn parse_param(raw: &str) -> Result<Self, ParamError> {
        Ok(raw.to_string())
    }

    fn format_param(&self) -> String {
        self.clone()
    }
}

impl BasicType for bool {
    const TYPE_NAME: &'static str = "bool";
    const IS_BOOLEAN: bool = true;

    fn parse_param(raw: &str) -> Result<Self, ParamError> {
        parse_bool(raw)
    }

    fn format_param(&self) -> String {
        self.to_string()
    }
}

/// Parse the boolean spellings accepted for parameters
pub fn parse_bool(raw: &str) -> Result<bool, ParamError> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(ParamError::BadBool),
    }
}

macro_rules! impl_integer {
    ($($ty:ty => $name:literal, $signed:expr, $bits:expr;)*) => {
        $(
            impl BasicType for $ty {
                const TYPE_NAME: &'static str = $name;

                fn parse_param(raw: &str) -> Result<Self, ParamError> {
                    raw.parse::<$ty>().map_err(|_| ParamError::BadNumber {
                        signed: $signed,
                        bits: $bits,
                    })
                }

                fn format_param(&self) -> String {
                    self.to_string()
                }
            }

            impl Integer for $ty {}
        )*
    };
}

impl_integer! {
    i8 => "i8", true, 8;
    i16 => "i16", true, 16;
    i32 => "i32", true, 32;
    i64 => "i64", true, 64;
    isize => "isize", true, 0;
    u8 => "u8", false, 8;
    u16 => "u16", false, 16;
    u32 => "u32", false, 32;
    u64 => "u64", false, 64;
    usize => "usize", false, 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("true", true)]
    #[case("T", true)]
    #[case("1", true)]
    #[case("False", false)]
    #[case("f", false)]
    #[case("0", false)]
    fn test_parse_bool(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(parse_bool(raw), Ok(expected));
    }

    #[rstest]
    #[case("yes")]
    #[case("tRuE")]
    #[case("")]
    fn test_parse_bool_rejects(#[case] raw: &str) {
        assert_eq!(parse_bool(raw), Err(ParamError::BadBool));
    }

    #[test]
    fn test_integer_errors_do_not_echo_input() {
        let err = u16::parse_param("hunter2").unwrap_err();
        assert_eq!(err, ParamError::BadNumber { signed: false, bits: 16 });
        assert!(!err.to_string().contains("hunter2"));

        let err = i8::parse_param("200").unwrap_err();
        assert_eq!(err.to_string(), "invalid value for signed 8-bit integer");

        let err = usize::parse_param("-1").unwrap_err();
        assert_eq!(err.to_string(), "invalid value for unsigned integer");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(String::TYPE_NAME, "string");
        assert_eq!(u16::TYPE_NAME, "u16");
        assert!(bool::IS_BOOLEAN);
        assert!(!u16::IS_BOOLEAN);
    }

    proptest! {
        #[test]
        fn prop_integer_format_parses_back(n in any::<i64>()) {
            prop_assert_eq!(i64::parse_param(&n.format_param()), Ok(n));
        }

        #[test]
        fn prop_strings_are_taken_verbatim(s in ".*") {
            prop_assert_eq!(String::parse_param(&s), Ok(s.clone()));
        }
    }
}
