//! Group related parameters in sets.
//!
//! ```text
//! cargo run --example parameter_sets -- -environment dev database -user app -password secret
//! CFG__DATABASE__USER=app CFG__DATABASE__PASSWORD=secret cargo run --example parameter_sets -- -environment stg
//! ```

use hotparam::{DynOneOf, DynamicType, EnvSource, Fixed, FlagSource, Loader, ParamRecord, SchemaBuilder};
use std::io;
use std::sync::Arc;

struct DbParams {
    server: Fixed<String>,
    port: Fixed<u16>,
    user: Fixed<String>,
    password: Fixed<String>,
}

impl DbParams {
    fn new() -> Self {
        Self {
            server: Fixed::new("localhost".to_string()),
            port: Fixed::new(5432),
            user: Fixed::default(),
            password: Fixed::default(),
        }
    }
}

struct Params {
    database: DbParams,
    environment: Arc<DynOneOf>,
    port: Fixed<u16>,
}

impl ParamRecord for Params {
    fn declare(&self, schema: &mut SchemaBuilder) {
        schema
            .dynamic("environment", &self.environment)
            .describe("What environment the app is running on");
        schema.param("port", &self.port).optional();
        schema.set("database", "Database connection", |set| {
            let db = &self.database;
            set.param("server", &db.server)
                .optional()
                .describe("Name of the database server");
            set.param("port", &db.port)
                .optional()
                .describe("TCP port number of database server");
            set.param("user", &db.user)
                .describe("Username for authentication");
            set.param("password", &db.password)
                .secret()
                .describe("Password for authentication");
        });
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    hotparam::logging::init()?;

    let params = Params {
        database: DbParams::new(),
        environment: Arc::new(DynOneOf::new(["dev", "stg", "prd"], "dev")),
        port: Fixed::new(8080),
    };

    let parsed = match Loader::new()
        .description("Demo App")
        .auto_usage(io::stderr(), |code| std::process::exit(code))
        .source(FlagSource::new())
        .source(EnvSource::new("cfg"))
        .parse(&params)
    {
        Ok(parsed) => parsed,
        Err(err) => {
            err.parsed().write_error(&mut io::stderr(), err.violations())?;
            std::process::exit(1);
        }
    };

    println!(
        "Running in {} mode on port {}, database {}@{}:{}",
        params.environment.value(),
        *params.port,
        params.database.user.as_str(),
        params.database.server.as_str(),
        *params.database.port,
    );
    parsed.dump(&mut io::stdout())?;
    Ok(())
}
