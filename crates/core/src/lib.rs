//! Core domain types and errors for `hotparam`.
//!
//! This crate holds the vocabulary shared by every other crate of the
//! workspace: the error types, the raw value sets reported by sources, and
//! the two contracts a parameter field can satisfy.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum, the per-value `ParamError`, and the
//!   aggregate `Violations` error returned whenever parameters are invalid.
//! - **`types`**: `ParamValues`, the `BasicType` contract with the `Fixed`
//!   cell used for static parameters, and the `DynamicType` capability trait
//!   implemented by hot-reloadable parameters.
//! - **`names`**: the naming rule for parameters and parameter sets.
//! - **`constants`**: placeholders used when rendering values.

pub mod constants;
pub mod errors;
pub mod names;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, ParamError, Result, Violation, Violations},
    names::is_valid_name,
    types::*,
};
