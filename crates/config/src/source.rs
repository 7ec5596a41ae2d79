//! Contract between the engine and the places values come from

use crate::updater::Updater;
use hotparam_core::{ParamValues, Violations};
use std::collections::BTreeMap;

/// What a source needs to know about one parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamInfo {
    /// Boolean parameters may be given without a value on the command line
    pub is_bool: bool,
}

/// The parameters a source may report, keyed by set then parameter name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamIds(BTreeMap<String, BTreeMap<String, ParamInfo>>);

impl ParamIds {
    pub fn get(&self, set_name: &str, param_name: &str) -> Option<ParamInfo> {
        self.0.get(set_name)?.get(param_name).copied()
    }

    pub fn has_set(&self, set_name: &str) -> bool {
        self.0.contains_key(set_name)
    }

    /// Parameters of one set
    pub fn set(&self, set_name: &str) -> Option<&BTreeMap<String, ParamInfo>> {
        self.0.get(set_name)
    }

    pub fn sets(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, ParamInfo>)> {
        self.0.iter().map(|(name, params)| (name.as_str(), params))
    }

    /// Iterate `(set, param, info)` in lexical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, ParamInfo)> {
        self.0.iter().flat_map(|(set_name, params)| {
            params
                .iter()
                .map(move |(name, info)| (set_name.as_str(), name.as_str(), *info))
        })
    }

    pub(crate) fn add_set(&mut self, set_name: &str) {
        self.0.entry(set_name.to_string()).or_default();
    }

    pub(crate) fn insert(&mut self, set_name: &str, param_name: &str, info: ParamInfo) {
        self.0
            .entry(set_name.to_string())
            .or_default()
            .insert(param_name.to_string(), info);
    }
}

/// A provider of raw parameter values.
///
/// `watch` is called exactly once, in priority order, while the
/// configuration loads. It returns the initial values and may keep the
/// [`Updater`] to report new values later from any thread. Reported keys
/// must be a subset of `ids`: anything else is a bug in the source and
/// aborts the process.
pub trait Source: Send {
    /// Name used in log entries
    fn name(&self) -> String;

    /// Start providing values
    ///
    /// # Errors
    ///
    /// Returns violations when the initial values cannot be read.
    fn watch(&mut self, ids: &ParamIds, updater: Updater) -> Result<ParamValues, Violations>;

    /// Release background resources
    fn stop(&mut self) {}

    /// Command-line sources also receive special parameters such as `help`
    fn is_command_line_flag(&self) -> bool {
        false
    }
}
