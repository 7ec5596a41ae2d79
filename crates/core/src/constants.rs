//! Constants used throughout the hotparam codebase

/// Name of the anonymous root parameter set
pub const ROOT_SET: &str = "";

/// Shown instead of the value of a secret parameter
pub const REDACTED_PLACEHOLDER: &str = "<redacted>";

/// Shown when a parameter has no value at all
pub const MISSING_PLACEHOLDER: &str = "<missing>";

/// Regular expression every parameter and parameter set name must match
pub const NAME_RULE: &str = "^[a-z][a-z0-9_-]{0,31}$";
