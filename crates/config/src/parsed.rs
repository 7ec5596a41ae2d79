//! Handle to a loaded configuration

use crate::refresh::Shared;
use crate::render;
use crate::schema::ParamSchema;
use crate::source::Source;
use crate::special::{self, AutoUsage};
use crate::updater::Updater;
use crate::validate::validate;
use hotparam_core::{Error, ParamValues, Result, Violations};
use parking_lot::Mutex;
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

/// A configuration bound to its sources.
///
/// Returned by [`Loader::parse`](crate::Loader::parse) on success, and
/// carried by [`ParseError`](crate::ParseError) on failure.
pub struct Parsed {
    shared: Arc<Shared>,
    sources: Mutex<Vec<Box<dyn Source>>>,
}

impl Parsed {
    pub(crate) fn new(shared: Arc<Shared>, sources: Vec<Box<dyn Source>>) -> Self {
        Self {
            shared,
            sources: Mutex::new(sources),
        }
    }

    pub(crate) fn shared(&self) -> &Shared {
        &self.shared
    }

    pub(crate) fn source_count(&self) -> usize {
        self.sources.lock().len()
    }

    /// Watch every source, validate once, let updates through and write
    /// every field.
    pub(crate) fn start(&self, auto_usage: Option<AutoUsage>) -> std::result::Result<(), Violations> {
        {
            let mut sources = self.sources.lock();
            for (index, source) in sources.iter_mut().enumerate() {
                let name = source.name();
                debug!(source = %name, index, "watching source");

                let ids = self.shared.schema.param_ids(source.is_command_line_flag());
                let updater = Updater::new(Arc::clone(&self.shared), index, name);
                let initial = source.watch(&ids, updater.clone())?;
                updater.store(initial, false);
            }
        }

        if let Some(auto_usage) = auto_usage {
            special::handle_help(self, auto_usage);
        }

        let values = self.shared.values.lock();
        validate(&self.shared.schema, &values.merged())?;
        // callbacks of the initial values may already push updates
        self.shared.gate.open();
        self.shared.refresh(values, true);
        Ok(())
    }

    /// Check the current values of every parameter
    ///
    /// # Errors
    ///
    /// Returns every missing or invalid parameter.
    pub fn valid(&self) -> std::result::Result<(), Violations> {
        let merged = self.values();
        validate(&self.shared.schema, &merged)
    }

    /// Raw values after merging every source by priority
    pub fn values(&self) -> ParamValues {
        self.shared.values.lock().merged()
    }

    pub fn schema(&self) -> &ParamSchema {
        &self.shared.schema
    }

    /// Write every parameter with its current value, secrets redacted
    ///
    /// # Errors
    ///
    /// Returns an I/O error when writing fails.
    pub fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        let text = render::dump(&self.shared.schema, &self.values());
        w.write_all(text.as_bytes())
            .map_err(|err| Error::io("write parameter dump", err))
    }

    /// Write the usage text
    ///
    /// # Errors
    ///
    /// Returns an I/O error when writing fails.
    pub fn usage<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        let text = render::usage(&self.shared.schema, &self.shared.settings);
        w.write_all(text.as_bytes())
            .map_err(|err| Error::io("write usage", err))
    }

    /// Write the violations that made loading fail, followed by the usage
    ///
    /// # Errors
    ///
    /// Returns an I/O error when writing fails.
    pub fn write_error<W: Write + ?Sized>(&self, w: &mut W, violations: &Violations) -> Result<()> {
        writeln!(w, "{}: {violations}", self.shared.settings.program_name)
            .map_err(|err| Error::io("write error report", err))?;
        self.usage(w)
    }

    /// Stop every source
    pub fn stop(&self) {
        for source in self.sources.lock().iter_mut() {
            debug!(source = %source.name(), "stopping source");
            source.stop();
        }
    }
}

impl fmt::Debug for Parsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parsed")
            .field("schema", &self.shared.schema)
            .field("gate", &self.shared.gate.state())
            .finish_non_exhaustive()
    }
}
