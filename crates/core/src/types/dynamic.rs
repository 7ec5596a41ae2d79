//! Capability trait for hot-reloadable parameter types

use crate::errors::ParamError;

/// A parameter type whose value may change after startup.
///
/// Implementors own their synchronization: `value` must be callable from any
/// thread while `unmarshal_param` runs on another one.
pub trait DynamicType: Send + Sync + 'static {
    /// Type returned by [`DynamicType::value`]
    type Value;

    /// Current value, or the default when nothing was applied
    fn value(&self) -> Self::Value;

    /// Apply a new raw value. `None` reverts to the default.
    ///
    /// # Errors
    ///
    /// Returns the parse error and leaves the current value unchanged.
    fn unmarshal_param(&self, raw: Option<&str>) -> Result<(), ParamError>;

    /// Check a raw value without applying it
    fn value_valid(&self, raw: &str) -> Result<(), ParamError>;

    /// Default rendered as a raw value
    fn default_value(&self) -> Result<String, ParamError>;

    /// Hide the sensitive parts of a raw value
    fn redact_value(&self, raw: &str) -> String {
        raw.to_string()
    }

    /// Type label shown in usage text
    fn describe_type(&self) -> String {
        short_type_name(std::any::type_name::<Self::Value>())
    }

    /// Boolean parameters accept the bare `-flag` syntax
    fn is_boolean(&self) -> bool {
        false
    }
}

/// Strip module paths from a fully qualified type name.
///
/// `core::option::Option<url::Url>` becomes `Option<Url>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut word = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            word.push(c);
        } else {
            out.push_str(last_segment(&word));
            word.clear();
            out.push(c);
        }
    }
    out.push_str(last_segment(&word));
    out
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
