//! Explicit schema construction from a user record
//!
//! A record lists its own fields once, in [`ParamRecord::declare`]:
//!
//! ```
//! use std::sync::Arc;
//! use hotparam_config::{ParamRecord, SchemaBuilder};
//! use hotparam_core::Fixed;
//! use hotparam_types::DynString;
//!
//! struct Params {
//!     server: Fixed<String>,
//!     port: Fixed<u16>,
//!     greeting: Arc<DynString>,
//!     db_host: Fixed<String>,
//! }
//!
//! impl ParamRecord for Params {
//!     fn declare(&self, schema: &mut SchemaBuilder) {
//!         schema.param("server", &self.server).describe("Server to connect to");
//!         schema.param("port", &self.port).optional();
//!         schema.dynamic("greeting", &self.greeting).optional();
//!         schema.set("db", "Database connection", |set| {
//!             set.param("host", &self.db_host);
//!         });
//!     }
//! }
//! ```
//!
//! Problems are collected while declaring and reported together by
//! [`SchemaBuilder::build`].

use crate::schema::{field_path, ParamField, ParamSchema, ParamSet};
use hotparam_core::{
    is_valid_name, BasicType, DynamicType, Fixed, Violation, Violations, NAME_RULE, ROOT_SET,
};
use indexmap::IndexMap;
use std::sync::Arc;

/// A record whose fields are configuration parameters
pub trait ParamRecord {
    fn declare(&self, schema: &mut SchemaBuilder);
}

/// Collects parameter declarations into a [`ParamSchema`]
#[derive(Debug)]
pub struct SchemaBuilder {
    sets: IndexMap<String, ParamSet>,
    violations: Violations,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        let mut sets = IndexMap::new();
        sets.insert(ROOT_SET.to_string(), ParamSet::default());
        Self {
            sets,
            violations: Violations::new(),
        }
    }

    /// Declare a static parameter in the root set
    pub fn param<T: BasicType>(&mut self, name: &str, cell: &Fixed<T>) -> FieldOptions<'_> {
        self.add_field(ROOT_SET, name, ParamField::fixed(cell))
    }

    /// Declare a dynamic parameter in the root set
    pub fn dynamic<D: DynamicType>(&mut self, name: &str, cell: &Arc<D>) -> FieldOptions<'_> {
        self.add_field(ROOT_SET, name, ParamField::dynamic(cell))
    }

    /// Declare a field with custom behavior in the root set
    pub fn field(&mut self, name: &str, field: ParamField) -> FieldOptions<'_> {
        self.add_field(ROOT_SET, name, field)
    }

    /// Declare a named parameter set
    pub fn set(
        &mut self,
        name: &str,
        description: &str,
        declare: impl FnOnce(&mut SetBuilder<'_>),
    ) -> &mut Self {
        if !is_valid_name(name) {
            self.violations.push(
                Violation::at_path(format!("/{name}"), invalid_name_message(name))
                    .with_set(name),
            );
        } else if self.sets.contains_key(name) {
            self.violations.push(Violation::at_path(
                format!("/{name}"),
                format!("parameter set {name:?} is declared more than once"),
            ));
        } else {
            self.sets.insert(
                name.to_string(),
                ParamSet {
                    description: description.to_string(),
                    fields: IndexMap::new(),
                },
            );
            let mut set = SetBuilder {
                builder: &mut *self,
                set_name: name.to_string(),
            };
            declare(&mut set);
        }
        self
    }

    /// Declare every parameter of an embedded record
    pub fn include<R: ParamRecord + ?Sized>(&mut self, record: &R) -> &mut Self {
        record.declare(self);
        self
    }

    /// Finish the schema, reporting every naming problem at once
    pub fn build(self) -> Result<ParamSchema, Violations> {
        self.violations.into_result()?;
        Ok(ParamSchema { sets: self.sets })
    }

    pub(crate) fn contains(&self, set_name: &str, param_name: &str) -> bool {
        self.sets
            .get(set_name)
            .is_some_and(|set| set.fields.contains_key(param_name))
    }

    pub(crate) fn push_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    fn add_field(&mut self, set_name: &str, name: &str, mut field: ParamField) -> FieldOptions<'_> {
        let path = field_path(set_name, name);

        if !is_valid_name(name) {
            self.violations.push(
                Violation::at_path(&path, invalid_name_message(name))
                    .with_set(set_name)
                    .with_param(name),
            );
            return FieldOptions { field: None };
        }

        let Some(set) = self.sets.get_mut(set_name) else {
            self.violations.push(Violation::at_path(
                &path,
                format!("parameter set {set_name:?} does not exist"),
            ));
            return FieldOptions { field: None };
        };

        let normalized = name.to_lowercase();
        if set.fields.keys().any(|existing| existing.to_lowercase() == normalized) {
            self.violations.push(
                Violation::at_path(&path, format!("parameter {name:?} is declared more than once"))
                    .with_set(set_name)
                    .with_param(name),
            );
            return FieldOptions { field: None };
        }

        field.path = path;
        let field = set.fields.entry(name.to_string()).or_insert(field);
        FieldOptions { field: Some(field) }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Declares the parameters of one set. Sets cannot contain sets.
pub struct SetBuilder<'a> {
    builder: &'a mut SchemaBuilder,
    set_name: String,
}

impl SetBuilder<'_> {
    pub fn param<T: BasicType>(&mut self, name: &str, cell: &Fixed<T>) -> FieldOptions<'_> {
        self.builder
            .add_field(&self.set_name, name, ParamField::fixed(cell))
    }

    pub fn dynamic<D: DynamicType>(&mut self, name: &str, cell: &Arc<D>) -> FieldOptions<'_> {
        self.builder
            .add_field(&self.set_name, name, ParamField::dynamic(cell))
    }

    pub fn field(&mut self, name: &str, field: ParamField) -> FieldOptions<'_> {
        self.builder.add_field(&self.set_name, name, field)
    }

    pub fn name(&self) -> &str {
        &self.set_name
    }
}

/// Options for a field that was just declared.
///
/// Does nothing when the declaration itself was rejected; the problem is
/// already recorded for [`SchemaBuilder::build`].
pub struct FieldOptions<'a> {
    field: Option<&'a mut ParamField>,
}

impl FieldOptions<'_> {
    /// The parameter may be omitted; its default applies
    pub fn optional(mut self) -> Self {
        if let Some(field) = self.field.as_deref_mut() {
            field.optional = true;
        }
        self
    }

    /// The value is never displayed
    pub fn secret(mut self) -> Self {
        if let Some(field) = self.field.as_deref_mut() {
            field.secret = true;
        }
        self
    }

    /// Text shown in usage output
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        if let Some(field) = self.field.as_deref_mut() {
            field.description = description.into();
        }
        self
    }
}

fn invalid_name_message(name: &str) -> String {
    format!("name {name:?} is invalid for parameter or set (valid: {NAME_RULE})")
}
