//! Validation violations and their aggregate error

use std::fmt;

/// One validation failure.
///
/// `value` holds the offending value already passed through the field's
/// redaction, so a violation can be printed or logged without leaking secrets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub set_name: String,
    pub param_name: String,
    pub value: Option<String>,
    pub message: String,
}

impl Violation {
    /// Create a violation without a location
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Create a violation located by set and parameter name
    #[must_use]
    pub fn for_param(
        set_name: impl Into<String>,
        param_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            set_name: set_name.into(),
            param_name: param_name.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Create a violation located by structural path
    #[must_use]
    pub fn at_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Attach the structural path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Attach the set name
    #[must_use]
    pub fn with_set(mut self, set_name: impl Into<String>) -> Self {
        self.set_name = set_name.into();
        self
    }

    /// Attach the parameter name
    #[must_use]
    pub fn with_param(mut self, param_name: impl Into<String>) -> Self {
        self.param_name = param_name.into();
        self
    }

    /// Attach the (already redacted) value that failed
    #[must_use]
    pub fn with_value(mut self, redacted: impl Into<String>) -> Self {
        self.value = Some(redacted.into());
        self
    }

    fn location(&self) -> Option<String> {
        if !self.path.is_empty() {
            return Some(self.path.clone());
        }
        match (self.set_name.is_empty(), self.param_name.is_empty()) {
            (false, false) => Some(format!("{}.{}", self.set_name, self.param_name)),
            (true, false) => Some(self.param_name.clone()),
            (false, true) => Some(self.set_name.clone()),
            (true, true) => None,
        }
    }

    fn sort_key(&self) -> (&str, &str, &str, &str) {
        (&self.path, &self.set_name, &self.param_name, &self.message)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = self.location() {
            write!(f, "{location}: ")?;
        }
        write!(f, "{}", self.message)?;
        if let Some(value) = &self.value {
            write!(f, " (parsing \"{value}\")")?;
        }
        Ok(())
    }
}

/// Aggregate error holding every violation found in one pass.
///
/// Rendering is deterministic: violations are sorted by path, set,
/// parameter and message regardless of the order they were recorded in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Violations in their rendering order
    pub fn sorted(&self) -> Vec<&Violation> {
        let mut sorted: Vec<&Violation> = self.0.iter().collect();
        sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        sorted
    }

    /// `Ok(())` when nothing was recorded, `Err(self)` otherwise
    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sorted = self.sorted();
        match sorted.as_slice() {
            [] => write!(f, "no invalid parameters"),
            [single] => write!(f, "{single}"),
            many => {
                write!(f, "multiple invalid parameters:")?;
                for violation in many {
                    write!(f, "\n- {violation}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Violations {}

impl From<Violation> for Violations {
    fn from(violation: Violation) -> Self {
        Self(vec![violation])
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Violation> for Violations {
    fn extend<I: IntoIterator<Item = Violation>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
