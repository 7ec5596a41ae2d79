//! Error types for hotparam operations

mod builders;
mod conversions;
mod display;
mod param;
mod types;
mod violation;

pub use param::ParamError;
pub use types::{Error, Result};
pub use violation::{Violation, Violations};
