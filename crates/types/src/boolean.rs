use crate::cell::{Cell, CellState};
use hotparam_core::{parse_bool, DynamicType, ParamError};

/// Dynamic boolean parameter.
///
/// Accepts `true`, `false`, `t`, `f`, `1` and `0` in any letter case, and the
/// bare `-flag` syntax on the command line.
#[derive(Debug)]
pub struct DynBool {
    cell: Cell<bool>,
}

impl DynBool {
    #[must_use]
    pub fn new(default: bool) -> Self {
        Self {
            cell: Cell::new(default),
        }
    }

    #[must_use]
    pub fn on_update(mut self, f: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.cell = self.cell.on_update(move |value: &bool| f(*value));
        self
    }

    pub fn state(&self) -> CellState {
        self.cell.state()
    }

    fn parse(raw: &str) -> Result<bool, ParamError> {
        parse_bool(&raw.to_ascii_lowercase())
    }
}

impl Default for DynBool {
    fn default() -> Self {
        Self::new(false)
    }
}

impl DynamicType for DynBool {
    type Value = bool;

    fn value(&self) -> bool {
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

    fn is_boolean(&self) -> bool {
        true
    }
}
