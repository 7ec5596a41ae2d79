//! Typed application parameters from prioritized sources, with hot reload
//!
//! A record declares its parameters once. [`Loader`] reads them from the
//! registered sources, the first source taking priority, validates the
//! merged values and writes them into the record. Static parameters
//! ([`Fixed`]) are written once; dynamic ones ([`DynString`], [`DynInt`],
//! ...) follow later updates from the sources.
//!
//! ```no_run
//! use std::sync::Arc;
//! use hotparam::{DynOneOf, DynamicType, EnvSource, FlagSource, Fixed, Loader, ParamRecord, SchemaBuilder};
//!
//! struct Params {
//!     server: Fixed<String>,
//!     port: Fixed<u16>,
//!     log_level: Arc<DynOneOf>,
//! }
//!
//! impl ParamRecord for Params {
//!     fn declare(&self, schema: &mut SchemaBuilder) {
//!         schema.param("server", &self.server).describe("Server to connect to");
//!         schema.param("port", &self.port).optional();
//!         schema.dynamic("log-level", &self.log_level).optional();
//!     }
//! }
//!
//! let params = Params {
//!     server: Fixed::default(),
//!     port: Fixed::new(8080),
//!     log_level: Arc::new(DynOneOf::new(["error", "info", "debug"], "info")),
//! };
//!
//! let parsed = match Loader::new()
//!     .source(FlagSource::new())
//!     .source(EnvSource::new("app"))
//!     .parse(&params)
//! {
//!     Ok(parsed) => parsed,
//!     Err(err) => {
//!         err.parsed().write_error(&mut std::io::stderr(), err.violations()).ok();
//!         std::process::exit(1);
//!     }
//! };
//!
//! println!("{}:{} logging at {}", *params.server, *params.port, params.log_level.value());
//! # drop(parsed);
//! ```

pub mod logging;

pub use hotparam_config::{
    testing, FieldOptions, Loader, ParamField, ParamIds, ParamInfo, ParamRecord, ParamSchema,
    ParamSet, ParseError, Parsed, SchemaBuilder, SetBuilder, Source, Updater,
};
pub use hotparam_core::{
    param_values, parse_bool, BasicType, DynamicType, Error, Fixed, Integer, ParamError,
    ParamValues, Result, Violation, Violations,
};
pub use hotparam_sources::{EnvSource, FlagSource};
pub use hotparam_types::{
    parse_url, CellState, DynBool, DynEd25519PrivateKey, DynInt, DynJson, DynOneOf, DynString, DynUrl, UrlValidator,
};
