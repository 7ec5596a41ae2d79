//! Parameters handled by the engine itself

use crate::builder::SchemaBuilder;
use crate::parsed::Parsed;
use crate::schema::ParamField;
use hotparam_core::{parse_bool, Violation, ROOT_SET};
use std::io::Write;
use tracing::{debug, error};

pub(crate) const HELP: &str = "help";
const HELP_DESCRIPTION: &str = "Display usage instructions";

/// Where usage goes when `-help` is given, and how the process ends after
pub(crate) struct AutoUsage {
    pub(crate) writer: Box<dyn Write + Send>,
    pub(crate) exit: Box<dyn FnMut(i32) + Send>,
}

/// Add the `help` flag to the root set
pub(crate) fn add_help(builder: &mut SchemaBuilder) {
    if builder.contains(ROOT_SET, HELP) {
        builder.push_violation(
            Violation::at_path(
                format!("/{HELP}"),
                "the help parameter cannot be declared when auto usage is enabled",
            )
            .with_param(HELP),
        );
        return;
    }

    let mut field = ParamField::from_parts(
        "bool",
        Box::new(|raw: &str| parse_bool(raw).map(drop)),
        Box::new(|_: Option<&str>| Ok(())),
        Box::new(|| Ok("false".to_string())),
        Box::new(str::to_string),
    );
    field.boolean = true;
    field.special = true;
    builder.field(HELP, field).optional().describe(HELP_DESCRIPTION);
}

/// Print usage and exit when `help` was requested
pub(crate) fn handle_help(parsed: &Parsed, auto_usage: AutoUsage) {
    let requested = parsed
        .shared()
        .values
        .lock()
        .desired(ROOT_SET, HELP)
        .is_some_and(|raw| parse_bool(raw).unwrap_or(true));
    if !requested {
        return;
    }

    debug!("help requested, printing usage");
    let AutoUsage {
        mut writer,
        mut exit,
    } = auto_usage;
    if let Err(err) = parsed.usage(&mut writer) {
        error!(error = %err, "failed to write usage");
    }
    exit(0);
    panic!("the auto usage exit function returned instead of terminating the process");
}
