use crate::cell::{Cell, CellState};
use hotparam_core::{DynamicType, ParamError};

/// Dynamic string parameter; every value is valid
#[derive(Debug)]
pub struct DynString {
    cell: Cell<String>,
}

impl DynString {
    #[must_use]
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            cell: Cell::new(default.into()),
        }
    }

    #[must_use]
    pub fn on_update(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.cell = self.cell.on_update(move |value: &String| f(value));
        self
    }

    pub fn state(&self) -> CellState {
        self.cell.state()
    }
}

impl Default for DynString {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl DynamicType for DynString {
    type Value = String;

    fn value(&self) -> String {
        self.cell.get()
    }

    fn unmarshal_param(&self, raw: Option<&str>) -> Result<(), ParamError> {
        self.cell.store(raw.map(str::to_string));
        Ok(())
    }

    fn value_valid(&self, _raw: &str) -> Result<(), ParamError> {
        Ok(())
    }

    fn default_value(&self) -> Result<String, ParamError> {
        Ok(self.cell.default_ref().clone())
    }

    fn describe_type(&self) -> String {
        "string".to_string()
    }
}
