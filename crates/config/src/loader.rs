//! Top-level entry point: bind a record to its sources
//!
//! ```no_run
//! use hotparam_config::{Loader, ParamRecord, SchemaBuilder};
//! use hotparam_config::testing::TestSource;
//! use hotparam_core::{param_values, Fixed};
//!
//! struct Params {
//!     server: Fixed<String>,
//! }
//!
//! impl ParamRecord for Params {
//!     fn declare(&self, schema: &mut SchemaBuilder) {
//!         schema.param("server", &self.server);
//!     }
//! }
//!
//! let params = Params { server: Fixed::default() };
//! let parsed = match Loader::new()
//!     .source(TestSource::new(param_values! { "" => { "server" => "localhost" } }))
//!     .parse(&params)
//! {
//!     Ok(parsed) => parsed,
//!     Err(err) => {
//!         err.parsed().write_error(&mut std::io::stderr(), err.violations()).ok();
//!         std::process::exit(1);
//!     }
//! };
//! assert_eq!(params.server.as_str(), "localhost");
//! # drop(parsed);
//! ```

use crate::builder::{ParamRecord, SchemaBuilder};
use crate::parsed::Parsed;
use crate::refresh::{Settings, Shared};
use crate::source::Source;
use crate::special::{self, AutoUsage};
use hotparam_core::{Error, Violations};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Builder for loading a configuration.
///
/// Sources are consulted in registration order; the first registered
/// source has the highest priority.
pub struct Loader {
    sources: Vec<Box<dyn Source>>,
    description: Option<String>,
    program_name: Option<String>,
    trim_space: bool,
    auto_usage: Option<AutoUsage>,
}

impl Loader {
    /// Create a new loader without sources
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            description: None,
            program_name: None,
            trim_space: false,
            auto_usage: None,
        }
    }

    /// Register a source with lower priority than those registered before
    pub fn source(mut self, source: impl Source + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// One-line description shown at the top of the usage text
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Program name used in usage text; defaults to the executable name
    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = Some(name.into());
        self
    }

    /// Strip leading and trailing whitespace from every value
    pub fn trim_space(mut self, trim: bool) -> Self {
        self.trim_space = trim;
        self
    }

    /// Accept `-help` on command-line sources: the usage text is written to
    /// `writer` and `exit` is called with status 0.
    pub fn auto_usage(
        mut self,
        writer: impl Write + Send + 'static,
        exit: impl FnMut(i32) + Send + 'static,
    ) -> Self {
        self.auto_usage = Some(AutoUsage {
            writer: Box::new(writer),
            exit: Box::new(exit),
        });
        self
    }

    /// Load the configuration into `record`.
    ///
    /// # Errors
    ///
    /// Returns every missing or invalid parameter. The error still carries
    /// the [`Parsed`] handle so usage and diagnostics can be rendered.
    ///
    /// # Panics
    ///
    /// When the record declares invalid or duplicate names, or when no
    /// source was registered. Both are programming errors.
    pub fn parse<R: ParamRecord + ?Sized>(self, record: &R) -> Result<Parsed, ParseError> {
        let Loader {
            sources,
            description,
            program_name,
            trim_space,
            auto_usage,
        } = self;

        assert!(!sources.is_empty(), "no configuration source was registered");

        let mut builder = SchemaBuilder::new();
        record.declare(&mut builder);
        if auto_usage.is_some() {
            special::add_help(&mut builder);
        }
        let schema = builder
            .build()
            .unwrap_or_else(|violations| panic!("invalid parameter record: {violations}"));

        let settings = Settings {
            program_name: program_name.unwrap_or_else(default_program_name),
            description,
            trim_space,
        };
        let shared = Arc::new(Shared::new(schema, settings, sources.len()));
        let parsed = Parsed::new(shared, sources);

        match parsed.start(auto_usage) {
            Ok(()) => {
                info!(sources = parsed.source_count(), "configuration loaded");
                Ok(parsed)
            }
            Err(violations) => {
                warn!(error = %violations, "configuration failed to load");
                parsed.shared().gate.abandon();
                Err(ParseError { parsed, violations })
            }
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn default_program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string())
}

/// Loading failed; the handle is kept so diagnostics can be rendered
#[derive(Debug, thiserror::Error)]
#[error("{violations}")]
pub struct ParseError {
    parsed: Parsed,
    violations: Violations,
}

impl ParseError {
    pub fn parsed(&self) -> &Parsed {
        &self.parsed
    }

    pub fn violations(&self) -> &Violations {
        &self.violations
    }

    pub fn into_parts(self) -> (Parsed, Violations) {
        (self.parsed, self.violations)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Violations(err.violations)
    }
}
