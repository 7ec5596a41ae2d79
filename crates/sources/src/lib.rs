//! Value sources for hotparam
//!
//! - [`FlagSource`] reads command-line arguments
//! - [`EnvSource`] reads prefixed environment variables
//!
//! Both report their values once, when the configuration loads.

pub mod env;
pub mod flags;

pub use env::{env_var_name, read_vars, EnvSource};
pub use flags::{parse_args, FlagSource};
