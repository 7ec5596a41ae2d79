//! The handle a source reports values through

use crate::refresh::Shared;
use crate::validate::validate_value;
use hotparam_core::{Error, ParamValues, Result};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Per-source mediator between a [`Source`](crate::Source) and the engine.
///
/// Cheap to clone and usable from any thread. Updates sent before the
/// configuration finished loading wait for it; if loading failed they are
/// discarded.
#[derive(Clone)]
pub struct Updater {
    shared: Arc<Shared>,
    index: usize,
    source_name: Arc<str>,
}

impl Updater {
    pub(crate) fn new(shared: Arc<Shared>, index: usize, source_name: impl Into<Arc<str>>) -> Self {
        Self {
            shared,
            index,
            source_name: source_name.into(),
        }
    }

    /// Replace every value this source reported before and apply the
    /// result to dynamic parameters.
    ///
    /// Invalid values are logged and kept out of the applied configuration
    /// until the source reports valid ones.
    ///
    /// # Panics
    ///
    /// When `values` contains a parameter that was not offered to the
    /// source in `watch`.
    pub fn update(&self, values: ParamValues) {
        if !self.shared.gate.wait() {
            warn!(
                source = %self.source_name,
                "discarding update because the configuration failed to load"
            );
            return;
        }

        self.store(values, true);
    }

    /// Emit a log entry attributed to this source
    pub fn log(&self, message: &str) {
        info!(source = %self.source_name, "{message}");
    }

    /// Value a higher priority source currently supplies for a parameter
    ///
    /// # Errors
    ///
    /// Fails for the highest priority source, which has nothing before it,
    /// and for parameters that were not declared.
    pub fn peek(&self, set_name: &str, param_name: &str) -> Result<Option<String>> {
        if self.index == 0 {
            return Err(Error::peek(
                &*self.source_name,
                "the first source cannot peek at values of sources before it",
            ));
        }

        if self.shared.schema.field(set_name, param_name).is_none() {
            return Err(Error::configuration(format!(
                "parameter {} is not declared",
                display_name(set_name, param_name)
            )));
        }

        let values = self.shared.values.lock();
        Ok(values
            .peek_before(self.index, set_name, param_name)
            .map(str::to_string))
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Priority of the source, 0 being the highest
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn store(&self, mut values: ParamValues, refresh: bool) {
        self.must_be_declared(&values);
        values.map_values(|raw| self.shared.settings.format_value(raw));
        self.log_invalid(&values);

        let mut store = self.shared.values.lock();
        store.store(self.index, values);

        if refresh {
            self.shared.refresh(store, false);
        }
    }

    fn log_invalid(&self, values: &ParamValues) {
        for (set_name, param_name, raw) in values.iter() {
            let Some(field) = self.shared.schema.field(set_name, param_name) else {
                continue;
            };
            if let Err(violation) = validate_value(set_name, param_name, field, Some(raw)) {
                warn!(
                    source = %self.source_name,
                    set = %set_name,
                    param = %param_name,
                    error = %violation,
                    "source reported an invalid value"
                );
            }
        }
    }

    fn must_be_declared(&self, values: &ParamValues) {
        for (set_name, param_name, _) in values.iter() {
            if self.shared.schema.set(set_name).is_none() {
                panic!(
                    "source {:?} is providing values for unsolicited parameter set {set_name:?}",
                    self.source_name
                );
            }
            if self.shared.schema.field(set_name, param_name).is_none() {
                panic!(
                    "source {:?} is providing a value for unsolicited parameter {}",
                    self.source_name,
                    display_name(set_name, param_name)
                );
            }
        }
    }
}

fn display_name(set_name: &str, param_name: &str) -> String {
    if set_name.is_empty() {
        param_name.to_string()
    } else {
        format!("{set_name}.{param_name}")
    }
}

impl fmt::Debug for Updater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Updater")
            .field("source_name", &self.source_name)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
