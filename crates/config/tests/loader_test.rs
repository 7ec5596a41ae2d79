//! Loading a record from prioritized sources

mod common;

use common::{init_logging, ServiceParams, SharedBuffer};
use hotparam_config::testing::TestSource;
use hotparam_config::{Loader, ParamRecord, SchemaBuilder};
use hotparam_core::{param_values, DynamicType, Fixed, ParamValues};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

#[test]
fn test_defaults_apply_to_optional_parameters() {
    init_logging();
    let params = ServiceParams::new();

    let parsed = Loader::new()
        .program_name("svc")
        .source(TestSource::new(param_values! { "" => { "server" => "db1" } }))
        .parse(&params)
        .unwrap();

    assert_eq!(params.server.as_str(), "db1");
    assert_eq!(*params.port, 8080);
    assert!(!params.port.is_set());
    assert_eq!(params.greeting(), "hello");
    assert_eq!(params.db_host.as_str(), "localhost");
    assert_eq!(params.db_pool.value(), 4);
    assert!(parsed.valid().is_ok());
}

#[test]
fn test_dump_redacts_secrets_and_marks_defaults() {
    init_logging();
    let params = ServiceParams::new();

    let parsed = Loader::new()
        .source(TestSource::new(param_values! {
            "" => { "server" => "x", "greeting" => "hi" },
            "db" => { "password" => "hunter2" },
        }))
        .parse(&params)
        .unwrap();

    let mut out = Vec::new();
    parsed.dump(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Parameter values:\n\
         - greeting = \"hi\"\n\
         - port = \"8080\" (default)\n\
         - server = \"x\"\n\
         - verbose = \"false\" (default)\n\
         \n\
         PARAMETER SET DB:\n\
         - host = \"localhost\" (default)\n\
         - password = \"<redacted>\"\n\
         - pool = \"4\" (default)\n"
    );
    assert_eq!(params.db_password.as_str(), "hunter2");
}

#[test]
fn test_missing_required_parameter_fails_with_handle() {
    init_logging();
    let params = ServiceParams::new();

    let err = Loader::new()
        .program_name("svc")
        .source(TestSource::new(ParamValues::new()))
        .parse(&params)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "server: parameter is required but was not specified"
    );
    assert_eq!(err.violations().len(), 1);

    let mut out = Vec::new();
    err.parsed().write_error(&mut out, err.violations()).unwrap();
    let report = String::from_utf8(out).unwrap();
    assert!(report.starts_with("svc: server: parameter is required but was not specified\n"));
    assert!(report.contains("Syntax:\nsvc \\\n    <-server string>"));

    // nothing was written into the record
    assert!(!params.server.is_set());
}

#[test]
fn test_every_violation_is_reported() {
    init_logging();
    let params = ServiceParams::new();

    let err = Loader::new()
        .source(TestSource::new(param_values! {
            "" => { "port" => "http", "verbose" => "maybe" },
            "db" => { "pool" => "300" },
        }))
        .parse(&params)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "multiple invalid parameters:\n\
         - port: invalid value for unsigned 16-bit integer (parsing \"http\")\n\
         - server: parameter is required but was not specified\n\
         - verbose: invalid boolean value (parsing \"maybe\")\n\
         - db.pool: invalid value for unsigned 8-bit integer (parsing \"300\")"
    );
}

#[test]
fn test_first_source_wins() {
    init_logging();
    let params = ServiceParams::new();
    let flags = TestSource::new(param_values! { "" => { "port" => "9090" } })
        .named("flags")
        .as_command_line();
    let env = TestSource::new(param_values! {
        "" => { "port" => "9091", "server" => "x" },
    })
    .named("env");

    let parsed = Loader::new()
        .source(flags)
        .source(env.clone())
        .parse(&params)
        .unwrap();

    assert_eq!(*params.port, 9090);
    assert_eq!(params.server.as_str(), "x");
    assert_eq!(
        parsed.values(),
        param_values! { "" => { "port" => "9090", "server" => "x" } }
    );

    // a lower priority source can see what overrides it
    assert_eq!(env.peek("", "port").unwrap().as_deref(), Some("9090"));
    assert_eq!(env.peek("", "server").unwrap(), None);
}

#[test]
fn test_trim_space() {
    init_logging();
    let params = ServiceParams::new();

    Loader::new()
        .trim_space(true)
        .source(TestSource::new(param_values! {
            "" => { "server" => "  spaced\t", "port" => " 81 " },
        }))
        .parse(&params)
        .unwrap();

    assert_eq!(params.server.as_str(), "spaced");
    assert_eq!(*params.port, 81);
}

#[test]
fn test_sources_see_the_declared_parameters() {
    init_logging();
    let params = ServiceParams::new();
    let source = TestSource::new(param_values! { "" => { "server" => "x" } });

    let parsed = Loader::new()
        .auto_usage(SharedBuffer::default(), |_| {})
        .source(source.clone())
        .parse(&params)
        .unwrap();

    let ids = source.ids().unwrap();
    assert!(ids.get("", "verbose").unwrap().is_bool);
    assert!(!ids.get("db", "pool").unwrap().is_bool);
    assert!(ids.has_set("db"));
    // help is only offered to command-line sources
    assert!(ids.get("", "help").is_none());

    parsed.stop();
    assert!(source.is_stopped());
}

#[test]
fn test_help_prints_usage_and_exits() {
    init_logging();
    let params = ServiceParams::new();
    let out = SharedBuffer::default();
    let status = Arc::new(AtomicI32::new(-1));
    let exit_status = Arc::clone(&status);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        Loader::new()
            .program_name("svc")
            .description("Talks to a server")
            .auto_usage(out.clone(), move |code| {
                exit_status.store(code, Ordering::SeqCst);
                panic::panic_any("exited");
            })
            .source(TestSource::new(param_values! { "" => { "help" => "true" } }).as_command_line())
            .parse(&params)
    }));

    assert!(result.is_err());
    assert_eq!(status.load(Ordering::SeqCst), 0);

    let usage = out.contents();
    assert!(usage.starts_with("Talks to a server\n\nSyntax:\nsvc \\\n    [-help] \\\n    <-server string>"));
    assert!(usage.contains("- help:bool default=false\n  Display usage instructions\n"));
}

#[test]
fn test_help_false_continues_loading() {
    init_logging();
    let params = ServiceParams::new();
    let out = SharedBuffer::default();

    let parsed = Loader::new()
        .auto_usage(out.clone(), |_| panic!("exit must not be called"))
        .source(
            TestSource::new(param_values! { "" => { "help" => "false", "server" => "x" } })
                .as_command_line(),
        )
        .parse(&params)
        .unwrap();

    assert!(out.contents().is_empty());
    assert!(parsed.valid().is_ok());
}

struct DeclaresHelp {
    help: Fixed<bool>,
}

impl ParamRecord for DeclaresHelp {
    fn declare(&self, schema: &mut SchemaBuilder) {
        schema.param("help", &self.help).optional();
    }
}

#[test]
#[should_panic(expected = "the help parameter cannot be declared when auto usage is enabled")]
fn test_help_conflict_panics() {
    let record = DeclaresHelp {
        help: Fixed::default(),
    };
    let _ = Loader::new()
        .auto_usage(SharedBuffer::default(), |_| {})
        .source(TestSource::new(ParamValues::new()))
        .parse(&record);
}

#[test]
fn test_help_is_an_ordinary_name_without_auto_usage() {
    let record = DeclaresHelp {
        help: Fixed::default(),
    };
    Loader::new()
        .source(TestSource::new(param_values! { "" => { "help" => "1" } }))
        .parse(&record)
        .unwrap();
    assert!(*record.help);
}

struct BadNames {
    a: Fixed<String>,
}

impl ParamRecord for BadNames {
    fn declare(&self, schema: &mut SchemaBuilder) {
        schema.param("Upper", &self.a);
    }
}

#[test]
#[should_panic(expected = "invalid parameter record")]
fn test_invalid_record_panics() {
    let record = BadNames { a: Fixed::default() };
    let _ = Loader::new()
        .source(TestSource::new(ParamValues::new()))
        .parse(&record);
}

#[test]
#[should_panic(expected = "no configuration source was registered")]
fn test_no_sources_panics() {
    let params = ServiceParams::new();
    let _ = Loader::new().parse(&params);
}

#[test]
#[should_panic(expected = "unsolicited parameter set \"cache\"")]
fn test_unsolicited_initial_values_panic() {
    let params = ServiceParams::new();
    let _ = Loader::new()
        .source(TestSource::new(param_values! { "cache" => { "size" => "1" } }))
        .parse(&params);
}
