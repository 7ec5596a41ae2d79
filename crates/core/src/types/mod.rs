//! Value sets and the contracts implemented by parameter field types

mod basic;
mod dynamic;
mod fixed;
mod values;

pub use basic::{parse_bool, BasicType, Integer};
pub use dynamic::{short_type_name, DynamicType};
pub use fixed::Fixed;
pub use values::ParamValues;
