//! Environment variables
//!
//! Every variable configuring the application shares a prefix, and every
//! variable carrying that prefix must match a parameter, so a misspelled
//! name is reported instead of silently ignored.
//!
//! With the prefix `app`:
//!
//! | parameter | set | variable |
//! |---|---|---|
//! | `log-level` | | `APP__LOG_LEVEL` |
//! | `max_conns` | | `APP__MAX_CONNS` |
//! | `address` | `http` | `APP__HTTP__ADDRESS` |
//!
//! `-` and `_` both map to `_`, so parameters differing only by these
//! characters cannot be told apart.

use hotparam_config::{ParamIds, Source, Updater};
use hotparam_core::{ParamValues, Violation, Violations, ROOT_SET};
use std::collections::BTreeMap;
use tracing::debug;

const SEPARATOR: &str = "__";

/// Source reading prefixed environment variables
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
    /// Read variables named `{PREFIX}__...` from the process environment
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            vars: None,
        }
    }

    /// Read the given variables instead of the process environment
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.vars = Some(
            vars.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        );
        self
    }

    fn vars(&self) -> Vec<(String, String)> {
        match &self.vars {
            Some(vars) => vars.clone(),
            // variables that are not valid unicode cannot carry a value
            None => std::env::vars_os()
                .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
                .collect(),
        }
    }
}

impl Source for EnvSource {
    fn name(&self) -> String {
        format!("env:{}", self.prefix)
    }

    fn watch(&mut self, ids: &ParamIds, _updater: Updater) -> Result<ParamValues, Violations> {
        read_vars(&self.prefix, self.vars(), ids)
    }
}

/// Name of the variable configuring a parameter
pub fn env_var_name(prefix: &str, set_name: &str, param_name: &str) -> String {
    let name = if set_name == ROOT_SET {
        [prefix, param_name].join(SEPARATOR)
    } else {
        [prefix, set_name, param_name].join(SEPARATOR)
    };
    name.replace('-', "_").to_uppercase()
}

/// Match `vars` against the declared parameters.
///
/// # Errors
///
/// Returns one violation per prefixed variable that matches no parameter.
pub fn read_vars(
    prefix: &str,
    vars: impl IntoIterator<Item = (String, String)>,
    ids: &ParamIds,
) -> Result<ParamValues, Violations> {
    let var_prefix = format!("{prefix}{SEPARATOR}").replace('-', "_").to_uppercase();
    let mut prefixed: BTreeMap<String, String> = vars
        .into_iter()
        .filter(|(name, _)| name.starts_with(&var_prefix))
        .collect();
    debug!(prefix = %var_prefix, count = prefixed.len(), "reading environment variables");

    let mut values = ParamValues::new();
    for (set_name, param_name, _) in ids.iter() {
        if let Some(value) = prefixed.remove(&env_var_name(prefix, set_name, param_name)) {
            values.insert(set_name, param_name, value);
        }
    }

    prefixed
        .into_keys()
        .map(|name| {
            Violation::new(format!(
                "environment variable {name:?} has the {var_prefix:?} prefix but does not match any parameter"
            ))
        })
        .collect::<Violations>()
        .into_result()?;

    Ok(values)
}
