use crate::cell::{Cell, CellState};
use hotparam_core::{DynamicType, ParamError};

/// Dynamic parameter restricted to a fixed list of choices.
///
/// ```
/// use hotparam_core::DynamicType;
/// use hotparam_types::DynOneOf;
///
/// let region = DynOneOf::new(["eu", "us"], "eu").ignore_case();
/// region.unmarshal_param(Some("US")).unwrap();
/// assert_eq!(region.value(), "US");
/// assert_eq!(region.describe_type(), "eu|us");
/// ```
#[derive(Debug)]
pub struct DynOneOf {
    choices: Vec<String>,
    ignore_case: bool,
    cell: Cell<String>,
}

impl DynOneOf {
    #[must_use]
    pub fn new<I, S>(choices: I, default: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            ignore_case: false,
            cell: Cell::new(default.into()),
        }
    }

    /// Match choices regardless of letter case
    #[must_use]
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    #[must_use]
    pub fn on_update(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.cell = self.cell.on_update(move |value: &String| f(value));
        self
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn state(&self) -> CellState {
        self.cell.state()
    }

    fn matches(&self, choice: &str, raw: &str) -> bool {
        if self.ignore_case {
            choice.eq_ignore_ascii_case(raw)
        } else {
            choice == raw
        }
    }

    fn check(&self, raw: &str) -> Result<(), ParamError> {
        if self.choices.iter().any(|choice| self.matches(choice, raw)) {
            Ok(())
        } else {
            Err(ParamError::NotOneOf {
                choices: self.choices.clone(),
            })
        }
    }
}

impl DynamicType for DynOneOf {
    type Value = String;

    fn value(&self) -> String {
        self.cell.get()
    }

    fn unmarshal_param(&self, raw: Option<&str>) -> Result<(), ParamError> {
        if let Some(raw) = raw {
            self.check(raw)?;
        }
        self.cell.store(raw.map(str::to_string));
        Ok(())
    }

    fn value_valid(&self, raw: &str) -> Result<(), ParamError> {
        self.check(raw)
    }

    fn default_value(&self) -> Result<String, ParamError> {
        let default = self.cell.default_ref();
        if self.choices.iter().any(|choice| choice == default) {
            Ok(default.clone())
        } else {
            Err(ParamError::invalid(format!(
                "default value is not in the list of choices [{}]",
                self.choices.join("|")
            )))
        }
    }

    fn describe_type(&self) -> String {
        self.choices.join("|")
    }
}
