//! Read a few parameters from flags and environment variables.
//!
//! ```text
//! APP__SERVER=db.local cargo run --example basic -- -port 5433 -verbose
//! ```

use hotparam::{EnvSource, Fixed, FlagSource, Loader, ParamRecord, SchemaBuilder};
use std::io;
use tracing::info;

struct Params {
    server: Fixed<String>,
    port: Fixed<u16>,
    verbose: Fixed<bool>,
    token: Fixed<String>,
}

impl ParamRecord for Params {
    fn declare(&self, schema: &mut SchemaBuilder) {
        schema
            .param("server", &self.server)
            .describe("Server to connect to");
        schema
            .param("port", &self.port)
            .optional()
            .describe("TCP port of the server");
        schema.param("verbose", &self.verbose).optional();
        schema
            .param("token", &self.token)
            .optional()
            .secret()
            .describe("Access token");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    hotparam::logging::init()?;

    let params = Params {
        server: Fixed::default(),
        port: Fixed::new(5432),
        verbose: Fixed::default(),
        token: Fixed::default(),
    };

    let parsed = match Loader::new()
        .description("Connects to a server")
        .source(FlagSource::new())
        .source(EnvSource::new("app"))
        .parse(&params)
    {
        Ok(parsed) => parsed,
        Err(err) => {
            err.parsed().write_error(&mut io::stderr(), err.violations())?;
            std::process::exit(1);
        }
    };

    info!(server = %params.server.as_str(), port = *params.port, verbose = *params.verbose, "connecting");
    parsed.dump(&mut io::stdout())?;
    Ok(())
}
