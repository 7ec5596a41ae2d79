//! Whole-schema validation of merged values

use crate::schema::{ParamField, ParamSchema};
use hotparam_core::{ParamValues, Violation, Violations};

pub(crate) const REQUIRED_MESSAGE: &str = "parameter is required but was not specified";

/// Check every declared parameter against the merged values.
///
/// Never stops at the first problem: the returned violations cover the
/// whole schema.
pub fn validate(schema: &ParamSchema, merged: &ParamValues) -> Result<(), Violations> {
    schema
        .fields()
        .filter_map(|(set_name, param_name, field)| {
            validate_value(set_name, param_name, field, merged.get(set_name, param_name)).err()
        })
        .collect::<Violations>()
        .into_result()
}

/// Check one value, `None` meaning no source supplied it
pub fn validate_value(
    set_name: &str,
    param_name: &str,
    field: &ParamField,
    value: Option<&str>,
) -> Result<(), Violation> {
    match value {
        None if field.is_optional() => Ok(()),
        None => Err(Violation::for_param(set_name, param_name, REQUIRED_MESSAGE)),
        Some(raw) => field.validate(raw).map_err(|err| {
            Violation::for_param(set_name, param_name, err.to_string()).with_value(field.redact(raw))
        }),
    }
}
