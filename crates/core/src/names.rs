//! Naming rule for parameters and parameter sets

use crate::constants::NAME_RULE;
use once_cell::sync::Lazy;
use regex::Regex;

/// Compiled form of [`NAME_RULE`]
pub static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(NAME_RULE).expect("NAME_RULE is a valid regular expression"));

/// Check whether `name` can be used for a parameter or a parameter set
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}
