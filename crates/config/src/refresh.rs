//! Shared engine state and propagation of merged values into fields

use crate::gate::StartupGate;
use crate::schema::{ParamField, ParamSchema};
use crate::slot::ApplyOutcome;
use crate::store::ValueStore;
use crate::validate::validate;
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, error, trace};

/// Loader options the engine keeps after startup
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) program_name: String,
    pub(crate) description: Option<String>,
    pub(crate) trim_space: bool,
}

impl Settings {
    pub(crate) fn format_value(&self, raw: &str) -> String {
        if self.trim_space {
            raw.trim().to_string()
        } else {
            raw.to_string()
        }
    }
}

/// State shared by the parsed handle and every updater.
///
/// `values` is the only engine-wide lock and is never held while a field
/// setter runs; each field orders its own setter calls through its slot.
pub(crate) struct Shared {
    pub(crate) schema: ParamSchema,
    pub(crate) settings: Settings,
    pub(crate) values: Mutex<ValueStore>,
    pub(crate) gate: StartupGate,
}

impl Shared {
    pub(crate) fn new(schema: ParamSchema, settings: Settings, sources: usize) -> Self {
        Self {
            schema,
            settings,
            values: Mutex::new(ValueStore::new(sources)),
            gate: StartupGate::new(),
        }
    }

    /// Push merged values into the bound fields.
    ///
    /// Nothing is applied when the merged values are invalid. Static fields
    /// are only written when `force_all` is set, and never reverted to their
    /// default. A failing setter is logged and the remaining fields are
    /// still updated.
    ///
    /// `values` is released before any setter runs, so callbacks may call
    /// back into the engine from any thread. The plan is tagged with the
    /// store generation: a field never goes back to values older than the
    /// ones it already received.
    pub(crate) fn refresh(&self, values: MutexGuard<'_, ValueStore>, force_all: bool) {
        if let Err(violations) = validate(&self.schema, &values.merged()) {
            error!(
                error = %violations,
                "refusing to update values because the configuration is invalid"
            );
            return;
        }

        let generation = values.generation();
        let plan = self.plan(&values, force_all);
        drop(values);

        for (set_name, param_name, field, desired) in plan {
            let outcome = field.slot.apply(generation, desired, |raw| {
                if let Err(err) = field.set_value(raw) {
                    error!(
                        set = %set_name,
                        param = %param_name,
                        path = %field.path(),
                        error = %err,
                        "failed to update parameter"
                    );
                }
            });
            if outcome != ApplyOutcome::Applied {
                trace!(
                    set = %set_name,
                    param = %param_name,
                    generation,
                    ?outcome,
                    "parameter not applied by this refresh"
                );
            }
        }
    }

    fn plan<'s>(
        &'s self,
        values: &ValueStore,
        force_all: bool,
    ) -> Vec<(&'s str, &'s str, &'s ParamField, Option<String>)> {
        let mut plan = Vec::new();
        for (set_name, param_name, field) in self.schema.fields() {
            if !field.is_dynamic() && !force_all {
                debug!(set = %set_name, param = %param_name, "not updating static parameter");
                continue;
            }

            let desired = values.desired(set_name, param_name).map(str::to_string);

            // a static field without a value keeps the default it was built with
            if !field.is_dynamic() && desired.is_none() {
                continue;
            }

            plan.push((set_name, param_name, field, desired));
        }
        plan
    }
}
