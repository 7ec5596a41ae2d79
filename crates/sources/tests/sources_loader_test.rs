//! Flags and environment variables feeding one configuration

use hotparam_config::{Loader, ParamRecord, SchemaBuilder};
use hotparam_core::{DynamicType, Fixed};
use hotparam_sources::{EnvSource, FlagSource};
use hotparam_types::DynBool;
use std::sync::Arc;

struct Params {
    server: Fixed<String>,
    port: Fixed<u16>,
    debug: Arc<DynBool>,
    http_addr: Fixed<String>,
}

impl Params {
    fn new() -> Self {
        Self {
            server: Fixed::default(),
            port: Fixed::new(8080),
            debug: Arc::new(DynBool::new(false)),
            http_addr: Fixed::new(":80".to_string()),
        }
    }
}

impl ParamRecord for Params {
    fn declare(&self, schema: &mut SchemaBuilder) {
        schema.param("server", &self.server);
        schema.param("port", &self.port).optional();
        schema.dynamic("debug", &self.debug).optional();
        schema.set("http", "HTTP listener", |set| {
            set.param("addr", &self.http_addr).optional();
        });
    }
}

#[test]
fn test_flags_take_priority_over_env() {
    let params = Params::new();

    let parsed = Loader::new()
        .source(FlagSource::with_args(["-port", "9090", "-debug"]))
        .source(EnvSource::new("svc").with_vars([
            ("SVC__PORT", "9091"),
            ("SVC__SERVER", "x"),
            ("SVC__HTTP__ADDR", ":8081"),
        ]))
        .parse(&params)
        .unwrap();

    assert_eq!(*params.port, 9090);
    assert_eq!(params.server.as_str(), "x");
    assert_eq!(params.http_addr.as_str(), ":8081");
    assert!(params.debug.value());
    assert!(parsed.valid().is_ok());
}

#[test]
fn test_flag_errors_fail_the_load() {
    let params = Params::new();

    let err = Loader::new()
        .source(FlagSource::with_args(["http"]))
        .source(EnvSource::new("svc").with_vars([("SVC__SERVER", "x")]))
        .parse(&params)
        .unwrap_err();

    assert_eq!(err.to_string(), "parameter set \"http\" has no parameters");
    assert!(!params.server.is_set());
}

#[test]
fn test_unknown_env_variables_fail_the_load() {
    let params = Params::new();

    let err = Loader::new()
        .source(EnvSource::new("svc").with_vars([("SVC__SERVER", "x"), ("SVC__SERVR", "y")]))
        .parse(&params)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "environment variable \"SVC__SERVR\" has the \"SVC__\" prefix but does not match any parameter"
    );
}

#[test]
fn test_help_reaches_only_the_flag_source() {
    let params = Params::new();

    // an env variable named after help is unknown to the env source
    let err = Loader::new()
        .auto_usage(std::io::sink(), |_| {})
        .source(FlagSource::with_args(["-server", "x"]))
        .source(EnvSource::new("svc").with_vars([("SVC__HELP", "1")]))
        .parse(&params)
        .unwrap_err();
    assert!(err.to_string().contains("\"SVC__HELP\""));

    let parsed = Loader::new()
        .auto_usage(std::io::sink(), |_| {})
        .source(FlagSource::with_args(["-server", "x", "-help=false"]))
        .parse(&Params::new())
        .unwrap();
    assert!(parsed.valid().is_ok());
}
