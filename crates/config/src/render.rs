//! Usage and dump text

use crate::refresh::Settings;
use crate::schema::{ParamField, ParamSchema, ParamSet};
use hotparam_core::{ParamValues, MISSING_PLACEHOLDER};
use std::fmt::Write;

/// Sets in name order, root first, skipping sets without parameters
fn sorted_sets(schema: &ParamSchema) -> Vec<(&str, &ParamSet)> {
    let mut sets: Vec<_> = schema.sets().filter(|(_, set)| !set.is_empty()).collect();
    sets.sort_by_key(|(name, _)| *name);
    sets
}

/// Special parameters first, then required ones, then by name
fn usage_order(set: &ParamSet) -> Vec<(&str, &ParamField)> {
    let mut fields: Vec<_> = set.fields().collect();
    fields.sort_by(|(a_name, a), (b_name, b)| {
        b.is_special()
            .cmp(&a.is_special())
            .then(a.is_optional().cmp(&b.is_optional()))
            .then(a_name.cmp(b_name))
    });
    fields
}

fn syntax_entry(name: &str, field: &ParamField) -> String {
    let content = if field.is_boolean() {
        format!("-{name}")
    } else {
        format!("-{name} {}", field.type_name())
    };

    if field.is_optional() {
        format!("[{content}]")
    } else {
        format!("<{content}>")
    }
}

pub(crate) fn usage(schema: &ParamSchema, settings: &Settings) -> String {
    let mut syntax = vec![settings.program_name.clone()];
    let mut docs = String::new();

    for (set_name, set) in sorted_sets(schema) {
        let indent = if set_name.is_empty() {
            docs.push_str("\nPARAMETERS\n");
            ""
        } else {
            syntax.push(set_name.to_string());
            let _ = writeln!(docs, "\nPARAMETER SET: {}", set_name.to_uppercase());
            if !set.description().is_empty() {
                let _ = writeln!(docs, "{}", set.description());
            }
            "    "
        };

        for (name, field) in usage_order(set) {
            syntax.push(format!("{indent}{}", syntax_entry(name, field)));

            let mut line = format!("- {name}:{}", field.type_name());
            if field.is_secret() {
                line.push_str(" secret");
            }
            if field.is_optional() {
                let _ = write!(line, " default={}", field.redacted_default());
            }
            let _ = writeln!(docs, "{line}");

            if !field.description().is_empty() {
                let _ = writeln!(docs, "  {}", field.description());
            }
        }
    }

    let mut out = String::new();
    if let Some(description) = settings.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "{description}\n");
    }
    let _ = writeln!(out, "Syntax:\n{}", syntax.join(" \\\n    "));
    out.push_str(&docs);
    out
}

pub(crate) fn dump(schema: &ParamSchema, merged: &ParamValues) -> String {
    let mut out = String::from("Parameter values:\n");

    for (set_name, set) in sorted_sets(schema) {
        if !set_name.is_empty() {
            let _ = writeln!(out, "\nPARAMETER SET {}:", set_name.to_uppercase());
        }

        let mut fields: Vec<_> = set.fields().collect();
        fields.sort_by_key(|(name, _)| *name);

        for (name, field) in fields {
            match merged.get(set_name, name) {
                Some(raw) => {
                    let _ = writeln!(out, "- {name} = {:?}", field.redact(raw));
                }
                None if field.is_optional() => {
                    let _ = writeln!(out, "- {name} = {:?} (default)", field.redacted_default());
                }
                None => {
                    let _ = writeln!(out, "- {name} = {MISSING_PLACEHOLDER:?}");
                }
            }
        }
    }

    out
}
