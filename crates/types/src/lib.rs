//! Hot-reloadable parameter types.
//!
//! Every type here is built on [`Cell`], which implements the update state
//! machine shared by all dynamic parameters: a value that can be read from
//! any thread at any time, replaced or reverted to its default by the
//! configuration engine, and an optional callback fired once per applied
//! value. Declare them in a record behind an `Arc`:
//!
//! ```
//! use std::sync::Arc;
//! use hotparam_core::DynamicType;
//! use hotparam_types::DynInt;
//!
//! let workers = Arc::new(DynInt::new(4u32).on_update(|n| println!("now {n} workers")));
//! workers.unmarshal_param(Some("8")).unwrap();
//! assert_eq!(workers.value(), 8);
//! ```

mod boolean;
mod cell;
mod ed25519;
mod integer;
mod json;
mod oneof;
mod string;
mod url;

pub use boolean::DynBool;
pub use cell::{Cell, CellState, UpdateFn};
pub use ed25519::DynEd25519PrivateKey;
pub use integer::DynInt;
pub use json::DynJson;
pub use oneof::DynOneOf;
pub use string::DynString;
pub use self::url::{parse_url, DynUrl, UrlValidator};
