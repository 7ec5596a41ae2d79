use crate::cell::{Cell, CellState};
use hotparam_core::{DynamicType, ParamError};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Dynamic parameter holding an arbitrary JSON document
#[derive(Debug)]
pub struct DynJson {
    cell: Cell<Value>,
}

impl DynJson {
    #[must_use]
    pub fn new(default: Value) -> Self {
        Self {
            cell: Cell::new(default),
        }
    }

    #[must_use]
    pub fn on_update(mut self, f: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.cell = self.cell.on_update(f);
        self
    }

    pub fn state(&self) -> CellState {
        self.cell.state()
    }

    /// Deserialize the current document into `T`
    ///
    /// # Errors
    ///
    /// Returns the deserialization error when the document does not fit `T`.
    pub fn value_as<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        self.cell.with(|value| T::deserialize(value))
    }

    fn parse(raw: &str) -> Result<Value, ParamError> {
        serde_json::from_str(raw).map_err(|err| {
            ParamError::invalid(format!(
                "invalid JSON at line {} column {}",
                err.line(),
                err.column()
            ))
        })
    }
}

impl Default for DynJson {
    fn default() -> Self {
        Self::new(Value::Null)
    }
}

impl DynamicType for DynJson {
    type Value = Value;

    fn value(&self) -> Value {
        self.cell.get()
    }

    fn unmarshal_param(&self, raw: Option<&str>) -> Result<(), ParamError> {
        let next = raw.map(Self::parse).transpose()?;
        self.cell.store(next);
        Ok(())
    }

    fn value_valid(&self, raw: &str) -> Result<(), ParamError> {
        Self::parse(raw).map(drop)
    }

    fn default_value(&self) -> Result<String, ParamError> {
        Ok(self.cell.default_ref().to_string())
    }

    fn describe_type(&self) -> String {
        "json".to_string()
    }
}
