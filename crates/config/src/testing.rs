//! In-memory source for tests
//!
//! ```
//! use std::sync::Arc;
//! use hotparam_config::{testing::TestSource, Loader, ParamRecord, SchemaBuilder};
//! use hotparam_core::{param_values, DynamicType};
//! use hotparam_types::DynInt;
//!
//! struct Params {
//!     workers: Arc<DynInt<u32>>,
//! }
//!
//! impl ParamRecord for Params {
//!     fn declare(&self, schema: &mut SchemaBuilder) {
//!         schema.dynamic("workers", &self.workers).optional();
//!     }
//! }
//!
//! let params = Params { workers: Arc::new(DynInt::new(4)) };
//! let source = TestSource::new(param_values! {});
//! let _parsed = Loader::new().source(source.clone()).parse(&params).unwrap();
//!
//! source.update("", "workers", "8");
//! assert_eq!(params.workers.value(), 8);
//! source.remove("", "workers");
//! assert_eq!(params.workers.value(), 4);
//! ```

use crate::source::{ParamIds, Source};
use crate::updater::Updater;
use hotparam_core::{ParamValues, Result, Violations};
use parking_lot::{Mutex, ReentrantMutex};
use std::sync::Arc;

/// Source whose values are set programmatically.
///
/// Clones share state: keep one clone to push updates after handing the
/// other to the loader.
///
/// Pushes through one source are serialized, so the engine always ends on
/// the values [`TestSource::values`] reports. A callback may push through
/// the source that triggered it on the same thread, but must not wait for
/// another thread pushing through that source.
#[derive(Clone)]
pub struct TestSource {
    inner: Arc<Mutex<TestState>>,
    push: Arc<ReentrantMutex<()>>,
}

struct TestState {
    name: String,
    command_line: bool,
    values: ParamValues,
    updater: Option<Updater>,
    ids: Option<ParamIds>,
    stopped: bool,
}

impl TestSource {
    pub fn new(values: ParamValues) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TestState {
                name: "test".to_string(),
                command_line: false,
                values,
                updater: None,
                ids: None,
                stopped: false,
            })),
            push: Arc::new(ReentrantMutex::new(())),
        }
    }

    /// Name used in log entries
    pub fn named(self, name: impl Into<String>) -> Self {
        self.inner.lock().name = name.into();
        self
    }

    /// Behave like a command-line source and receive special parameters
    pub fn as_command_line(self) -> Self {
        self.inner.lock().command_line = true;
        self
    }

    /// Set one value and push the full value set
    pub fn update(&self, set_name: &str, param_name: &str, value: &str) {
        self.modify(|values| {
            values.insert(set_name, param_name, value);
        });
    }

    /// Remove one value and push the full value set
    pub fn remove(&self, set_name: &str, param_name: &str) {
        self.modify(|values| {
            values.remove(set_name, param_name);
        });
    }

    /// Replace every value and push them
    pub fn replace(&self, values: ParamValues) {
        self.modify(|current| *current = values);
    }

    /// Read a value from a higher priority source
    ///
    /// # Errors
    ///
    /// See [`Updater::peek`]. Fails as well when the source is not watched yet.
    pub fn peek(&self, set_name: &str, param_name: &str) -> Result<Option<String>> {
        let updater = self.inner.lock().updater.clone();
        match updater {
            Some(updater) => updater.peek(set_name, param_name),
            None => Err(hotparam_core::Error::configuration(
                "the test source is not watched yet",
            )),
        }
    }

    /// Parameters offered by the loader
    pub fn ids(&self) -> Option<ParamIds> {
        self.inner.lock().ids.clone()
    }

    pub fn values(&self) -> ParamValues {
        self.inner.lock().values.clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.lock().stopped
    }

    fn modify(&self, f: impl FnOnce(&mut ParamValues)) {
        let _push = self.push.lock();
        let (values, updater) = {
            let mut state = self.inner.lock();
            f(&mut state.values);
            (state.values.clone(), state.updater.clone())
        };

        // before watch the values are simply reported as initial values
        if let Some(updater) = updater {
            updater.update(values);
        }
    }
}

impl Source for TestSource {
    fn name(&self) -> String {
        self.inner.lock().name.clone()
    }

    fn watch(&mut self, ids: &ParamIds, updater: Updater) -> std::result::Result<ParamValues, Violations> {
        let mut state = self.inner.lock();
        state.updater = Some(updater);
        state.ids = Some(ids.clone());
        Ok(state.values.clone())
    }

    fn stop(&mut self) {
        self.inner.lock().stopped = true;
    }

    fn is_command_line_flag(&self) -> bool {
        self.inner.lock().command_line
    }
}
