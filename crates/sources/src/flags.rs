//! Command-line flags
//!
//! Each parameter is given as `-name value` or `-name=value`; `--name` is
//! the same as `-name`. Boolean parameters are given as `-flag` or
//! `-flag=<bool>`, never as `-flag <bool>`.
//!
//! A bare name starts a parameter set; the parameters after it belong to
//! that set:
//!
//! ```text
//! ./server -verbose http -addr :8080 -max-connections 64 grpc -addr=:6800
//! ```

use hotparam_config::{ParamIds, Source, Updater};
use hotparam_core::{is_valid_name, ParamValues, Violation, Violations, NAME_RULE, ROOT_SET};
use tracing::debug;

/// Source reading command-line arguments
#[derive(Debug, Clone, Default)]
pub struct FlagSource {
    args: Option<Vec<String>>,
}

impl FlagSource {
    /// Read the arguments of the current process, program name excluded
    pub fn new() -> Self {
        Self { args: None }
    }

    /// Read the given arguments instead of the process arguments
    pub fn with_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: Some(args.into_iter().map(Into::into).collect()),
        }
    }
}

impl Source for FlagSource {
    fn name(&self) -> String {
        "flags".to_string()
    }

    fn watch(&mut self, ids: &ParamIds, _updater: Updater) -> Result<ParamValues, Violations> {
        let args = match &self.args {
            Some(args) => args.clone(),
            None => std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect(),
        };
        debug!(count = args.len(), "parsing command-line arguments");

        parse_args(&args, ids).map_err(Violations::from)
    }

    fn is_command_line_flag(&self) -> bool {
        true
    }
}

/// Parse `args` against the parameters the application declared.
///
/// Parsing stops at the first problem: once an argument is not understood
/// it is unknown whether the next one is its value or a new parameter.
///
/// # Errors
///
/// Returns a violation describing the first argument that cannot be parsed.
pub fn parse_args(args: &[String], ids: &ParamIds) -> Result<ParamValues, Violation> {
    FlagParser {
        args,
        position: 0,
        ids,
        set_name: ROOT_SET.to_string(),
        set_len: 0,
        values: ParamValues::new(),
    }
    .run()
}

struct FlagParser<'a> {
    args: &'a [String],
    position: usize,
    ids: &'a ParamIds,
    set_name: String,
    set_len: usize,
    values: ParamValues,
}

impl<'a> FlagParser<'a> {
    fn run(mut self) -> Result<ParamValues, Violation> {
        while let Some(token) = self.next_token() {
            match token.strip_prefix('-') {
                Some(flag) => {
                    let flag = flag.strip_prefix('-').unwrap_or(flag);
                    self.read_param(flag)?;
                }
                None => self.start_set(token)?,
            }
        }

        self.finish_set()?;
        Ok(self.values)
    }

    fn next_token(&mut self) -> Option<&'a str> {
        let args = self.args;
        let token = args.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    fn start_set(&mut self, name: &str) -> Result<(), Violation> {
        if !is_valid_name(name) {
            return Err(self.violation(format!(
                "{name:?} is neither a parameter nor a valid parameter set name"
            )));
        }
        if !self.ids.has_set(name) {
            return Err(Violation::new(format!(
                "parameter set {name:?} is not expected by the application"
            )));
        }

        self.finish_set()?;
        self.set_name = name.to_string();
        self.set_len = 0;
        Ok(())
    }

    fn finish_set(&self) -> Result<(), Violation> {
        if self.set_name != ROOT_SET && self.set_len == 0 {
            return Err(Violation::new(format!(
                "parameter set {:?} has no parameters",
                self.set_name
            )));
        }
        Ok(())
    }

    fn read_param(&mut self, flag: &str) -> Result<(), Violation> {
        let (name, inline_value) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (flag, None),
        };

        if !is_valid_name(name) {
            return Err(self.violation(format!(
                "{name:?} is not valid for a parameter or set name (valid: {NAME_RULE})"
            )));
        }

        let Some(info) = self.ids.get(&self.set_name, name) else {
            return Err(self.violation(format!(
                "argument {} {name:?} is not expected by the application; arguments after it were not processed",
                self.position
            )));
        };

        let value = match inline_value {
            Some(value) => value.to_string(),
            None if info.is_bool => "true".to_string(),
            None => match self.next_token() {
                Some(value) => value.to_string(),
                None => {
                    return Err(self.violation(format!("parameter {name:?} has no value")));
                }
            },
        };

        self.values.insert(self.set_name.as_str(), name, value);
        self.set_len += 1;
        Ok(())
    }

    /// A violation located in the set being parsed
    fn violation(&self, message: String) -> Violation {
        Violation::new(message).with_set(self.set_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotparam_config::SchemaBuilder;
    use hotparam_core::{param_values, Fixed};
    use hotparam_types::DynBool;
    use rstest::rstest;
    use std::sync::Arc;

    /// Root: `verbose` (bool), `port`. Set `http`: `addr`, `tls` (bool).
    /// Set `grpc`: `addr`.
    fn ids() -> ParamIds {
        let text = Fixed::<String>::default();
        let flag = Arc::new(DynBool::new(false));

        let mut builder = SchemaBuilder::new();
        builder.dynamic("verbose", &flag);
        builder.param("port", &text);
        builder.set("http", "", |set| {
            set.param("addr", &text);
            set.dynamic("tls", &flag);
        });
        builder.set("grpc", "", |set| {
            set.param("addr", &text);
        });
        builder.set("unused", "", |_| {});
        builder.build().unwrap().param_ids(true)
    }

    fn parse(args: &[&str]) -> Result<ParamValues, Violation> {
        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        parse_args(&args, &ids())
    }

    #[rstest]
    #[case(&[], param_values! {})]
    #[case(&["-port", "80"], param_values! { "" => { "port" => "80" } })]
    #[case(&["-port=80"], param_values! { "" => { "port" => "80" } })]
    #[case(&["--port", "80"], param_values! { "" => { "port" => "80" } })]
    #[case(&["--port=a=b"], param_values! { "" => { "port" => "a=b" } })]
    #[case(&["-port="], param_values! { "" => { "port" => "" } })]
    #[case(&["-port", "-1"], param_values! { "" => { "port" => "-1" } })]
    #[case(&["-verbose"], param_values! { "" => { "verbose" => "true" } })]
    #[case(&["-verbose=false"], param_values! { "" => { "verbose" => "false" } })]
    #[case(&["-port", "1", "-port", "2"], param_values! { "" => { "port" => "2" } })]
    fn test_root_parameters(#[case] args: &[&str], #[case] expected: ParamValues) {
        assert_eq!(parse(args).unwrap(), expected);
    }

    #[test]
    fn test_parameter_sets() {
        let values = parse(&[
            "-verbose", "http", "-addr", ":8080", "-tls", "grpc", "-addr=:6800",
        ])
        .unwrap();

        assert_eq!(
            values,
            param_values! {
                "" => { "verbose" => "true" },
                "http" => { "addr" => ":8080", "tls" => "true" },
                "grpc" => { "addr" => ":6800" },
            }
        );
    }

    #[test]
    fn test_boolean_does_not_consume_the_next_argument() {
        // "true" is read as a set name, which is invalid here
        let err = parse(&["-verbose", "true"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "parameter set \"true\" is not expected by the application"
        );
    }

    #[rstest]
    #[case(&["-nope", "1"], "argument 1 \"nope\" is not expected by the application; arguments after it were not processed")]
    #[case(&["-port"], "parameter \"port\" has no value")]
    #[case(&["-Port=1"], "\"Port\" is not valid for a parameter or set name (valid: ^[a-z][a-z0-9_-]{0,31}$)")]
    #[case(&["-"], "\"\" is not valid for a parameter or set name (valid: ^[a-z][a-z0-9_-]{0,31}$)")]
    #[case(&["Http"], "\"Http\" is neither a parameter nor a valid parameter set name")]
    #[case(&["http"], "parameter set \"http\" has no parameters")]
    #[case(&["http", "grpc", "-addr", "x"], "parameter set \"http\" has no parameters")]
    #[case(&["unused"], "parameter set \"unused\" has no parameters")]
    #[case(&["http", "-port", "1"], "http: argument 2 \"port\" is not expected by the application; arguments after it were not processed")]
    #[case(&["grpc", "-addr"], "grpc: parameter \"addr\" has no value")]
    fn test_errors(#[case] args: &[&str], #[case] message: &str) {
        assert_eq!(parse(args).unwrap_err().to_string(), message);
    }

    #[test]
    fn test_is_command_line_source() {
        assert!(FlagSource::new().is_command_line_flag());
        assert_eq!(FlagSource::new().name(), "flags");
    }
}
