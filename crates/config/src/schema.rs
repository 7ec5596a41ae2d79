//! Declarative description of every parameter an application accepts

use crate::slot::ApplySlot;
use crate::source::{ParamIds, ParamInfo};
use hotparam_core::{
    BasicType, DynamicType, Fixed, ParamError, MISSING_PLACEHOLDER, REDACTED_PLACEHOLDER, ROOT_SET,
};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

pub type ValidateFn = Box<dyn Fn(&str) -> Result<(), ParamError> + Send + Sync>;
pub type SetValueFn = Box<dyn Fn(Option<&str>) -> Result<(), ParamError> + Send + Sync>;
pub type DefaultFn = Box<dyn Fn() -> Result<String, ParamError> + Send + Sync>;
pub type RedactFn = Box<dyn Fn(&str) -> String + Send + Sync>;

/// One declared parameter: its options plus the behavior bound to the
/// record field it was declared from.
pub struct ParamField {
    pub(crate) type_name: String,
    pub(crate) optional: bool,
    pub(crate) secret: bool,
    pub(crate) dynamic: bool,
    pub(crate) boolean: bool,
    pub(crate) special: bool,
    pub(crate) description: String,
    pub(crate) path: String,
    pub(crate) slot: ApplySlot,
    validate: ValidateFn,
    set_value: SetValueFn,
    default_value: DefaultFn,
    redact: RedactFn,
}

impl ParamField {
    /// Field backed by a static, write-once cell
    pub fn fixed<T: BasicType>(cell: &Fixed<T>) -> Self {
        let target = cell.clone();
        let default = cell.default_value().format_param();

        Self::from_parts(
            T::TYPE_NAME.to_string(),
            Box::new(|raw: &str| T::parse_param(raw).map(drop)),
            Box::new(move |raw: Option<&str>| match raw {
                Some(raw) => target.set_param(raw),
                None => Err(ParamError::invalid(
                    "a static parameter cannot revert to its default",
                )),
            }),
            Box::new(move || Ok(default.clone())),
            Box::new(str::to_string),
        )
        .boolean(T::IS_BOOLEAN)
    }

    /// Field backed by a hot-reloadable cell
    pub fn dynamic<D: DynamicType>(cell: &Arc<D>) -> Self {
        let validator = Arc::clone(cell);
        let setter = Arc::clone(cell);
        let defaults = Arc::clone(cell);
        let redactor = Arc::clone(cell);

        let mut field = Self::from_parts(
            cell.describe_type(),
            Box::new(move |raw: &str| validator.value_valid(raw)),
            Box::new(move |raw: Option<&str>| setter.unmarshal_param(raw)),
            Box::new(move || defaults.default_value()),
            Box::new(move |raw: &str| redactor.redact_value(raw)),
        )
        .boolean(cell.is_boolean());
        field.dynamic = true;
        field
    }

    /// Field with caller supplied behavior
    pub fn from_parts(
        type_name: impl Into<String>,
        validate: ValidateFn,
        set_value: SetValueFn,
        default_value: DefaultFn,
        redact: RedactFn,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            optional: false,
            secret: false,
            dynamic: false,
            boolean: false,
            special: false,
            description: String::new(),
            path: String::new(),
            slot: ApplySlot::new(),
            validate,
            set_value,
            default_value,
            redact,
        }
    }

    fn boolean(mut self, boolean: bool) -> Self {
        self.boolean = boolean;
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn is_boolean(&self) -> bool {
        self.boolean
    }

    pub fn is_special(&self) -> bool {
        self.special
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Structural path, `/{param}` or `/{set}/{param}`
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn validate(&self, raw: &str) -> Result<(), ParamError> {
        (self.validate)(raw)
    }

    pub fn set_value(&self, raw: Option<&str>) -> Result<(), ParamError> {
        (self.set_value)(raw)
    }

    pub fn default_value(&self) -> Result<String, ParamError> {
        (self.default_value)()
    }

    /// Render `raw` safely: secrets become a fixed placeholder, other
    /// values go through the type's own redaction.
    pub fn redact(&self, raw: &str) -> String {
        if self.secret {
            REDACTED_PLACEHOLDER.to_string()
        } else {
            (self.redact)(raw)
        }
    }

    /// Default value as it may be displayed
    pub fn redacted_default(&self) -> String {
        match self.default_value() {
            Ok(default) => self.redact(&default),
            Err(_) => MISSING_PLACEHOLDER.to_string(),
        }
    }
}

impl fmt::Debug for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamField")
            .field("path", &self.path)
            .field("type_name", &self.type_name)
            .field("optional", &self.optional)
            .field("secret", &self.secret)
            .field("dynamic", &self.dynamic)
            .field("boolean", &self.boolean)
            .field("special", &self.special)
            .finish_non_exhaustive()
    }
}

/// A named group of parameters
#[derive(Debug, Default)]
pub struct ParamSet {
    pub(crate) description: String,
    pub(crate) fields: IndexMap<String, ParamField>,
}

impl ParamSet {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn field(&self, name: &str) -> Option<&ParamField> {
        self.fields.get(name)
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &ParamField)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Every parameter set, root set first, in declaration order.
///
/// Immutable once built; shared by the loader, updaters and the parsed
/// handle.
#[derive(Debug)]
pub struct ParamSchema {
    pub(crate) sets: IndexMap<String, ParamSet>,
}

impl ParamSchema {
    pub fn set(&self, name: &str) -> Option<&ParamSet> {
        self.sets.get(name)
    }

    pub fn field(&self, set_name: &str, param_name: &str) -> Option<&ParamField> {
        self.sets.get(set_name)?.field(param_name)
    }

    pub fn root(&self) -> Option<&ParamSet> {
        self.sets.get(ROOT_SET)
    }

    pub fn sets(&self) -> impl Iterator<Item = (&str, &ParamSet)> {
        self.sets.iter().map(|(name, set)| (name.as_str(), set))
    }

    /// Iterate `(set, param, field)` in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str, &ParamField)> {
        self.sets.iter().flat_map(|(set_name, set)| {
            set.fields
                .iter()
                .map(move |(name, field)| (set_name.as_str(), name.as_str(), field))
        })
    }

    /// Parameters a source may report. Special parameters are only exposed
    /// to command-line sources.
    pub fn param_ids(&self, command_line: bool) -> ParamIds {
        let mut ids = ParamIds::default();
        for (set_name, set) in &self.sets {
            ids.add_set(set_name);
            for (name, field) in &set.fields {
                if field.special && !command_line {
                    continue;
                }
                ids.insert(
                    set_name,
                    name,
                    ParamInfo {
                        is_bool: field.boolean,
                    },
                );
            }
        }
        ids
    }
}

/// Structural path of a parameter
pub(crate) fn field_path(set_name: &str, param_name: &str) -> String {
    if set_name.is_empty() {
        format!("/{param_name}")
    } else {
        format!("/{set_name}/{param_name}")
    }
}
