use crate::cell::{Cell, CellState};
use hotparam_core::{DynamicType, Integer, ParamError};

/// Dynamic integer parameter of any width
#[derive(Debug)]
pub struct DynInt<T> {
    cell: Cell<T>,
}

impl<T: Integer> DynInt<T> {
    #[must_use]
    pub fn new(default: T) -> Self {
        Self {
            cell: Cell::new(default),
        }
    }

    #[must_use]
    pub fn on_update(mut self, f: impl Fn(T) + Send + Sync + 'static) -> Self {
        self.cell = self.cell.on_update(move |value: &T| f(*value));
        self
    }

    pub fn state(&self) -> CellState {
        self.cell.state()
    }
}

impl<T: Integer + Default> Default for DynInt<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Integer> DynamicType for DynInt<T> {
    type Value = T;

    fn value(&self) -> T {
        self.cell.get()
    }

    fn unmarshal_param(&self, raw: Option<&str>) -> Result<(), ParamError> {
        let next = raw.map(T::parse_param).transpose()?;
        self.cell.store(next);
        Ok(())
    }

    fn value_valid(&self, raw: &str) -> Result<(), ParamError> {
        T::parse_param(raw).map(drop)
    }

    fn default_value(&self) -> Result<String, ParamError> {
        Ok(self.cell.default_ref().to_string())
    }

    fn describe_type(&self) -> String {
        T::TYPE_NAME.to_string()
    }
}
