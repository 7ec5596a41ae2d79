//! Parameter schema, value resolution and hot reload for hotparam
//!
//! A record declares its parameters through [`ParamRecord`]; the [`Loader`]
//! turns that declaration into a [`ParamSchema`], asks every registered
//! [`Source`] for its values, merges them by priority, validates the result
//! and writes it into the record. Sources keep an [`Updater`] to push new
//! values later; accepted values reach dynamic fields without a restart.

pub mod builder;
pub mod gate;
pub mod loader;
pub mod merge;
pub mod parsed;
mod refresh;
mod render;
pub mod schema;
pub mod slot;
pub mod source;
mod special;
pub mod store;
pub mod testing;
pub mod updater;
pub mod validate;

pub use builder::{FieldOptions, ParamRecord, SchemaBuilder, SetBuilder};
pub use gate::{GateState, StartupGate};
pub use loader::{Loader, ParseError};
pub use merge::{desired_value, merge};
pub use parsed::Parsed;
pub use schema::{ParamField, ParamSchema, ParamSet};
pub use slot::{ApplyOutcome, ApplySlot};
pub use source::{ParamIds, ParamInfo, Source};
pub use store::ValueStore;
pub use updater::Updater;
pub use validate::{validate, validate_value};
