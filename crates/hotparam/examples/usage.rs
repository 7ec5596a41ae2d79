//! Print usage instructions with `-help`.
//!
//! ```text
//! cargo run --example usage -- -help
//! ```

use hotparam::{DynBool, EnvSource, Fixed, FlagSource, Loader, ParamRecord, SchemaBuilder};
use std::io;
use std::sync::Arc;

struct Params {
    listen: Fixed<String>,
    workers: Fixed<u16>,
    debug: Arc<DynBool>,
    api_key: Fixed<String>,
    cache_size: Fixed<u64>,
}

impl ParamRecord for Params {
    fn declare(&self, schema: &mut SchemaBuilder) {
        schema
            .param("listen", &self.listen)
            .describe("Address to listen on");
        schema.param("workers", &self.workers).optional();
        schema
            .dynamic("debug", &self.debug)
            .optional()
            .describe("Log every request");
        schema
            .param("api-key", &self.api_key)
            .secret()
            .describe("Key for the upstream API");
        schema.set("cache", "Response cache", |set| {
            set.param("size", &self.cache_size)
                .optional()
                .describe("Maximum number of entries");
        });
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    hotparam::logging::init()?;

    let params = Params {
        listen: Fixed::default(),
        workers: Fixed::new(4),
        debug: Arc::new(DynBool::new(false)),
        api_key: Fixed::default(),
        cache_size: Fixed::new(1024),
    };

    let parsed = match Loader::new()
        .program_name("usage")
        .description("Serves cached API responses")
        .auto_usage(io::stdout(), |code| std::process::exit(code))
        .source(FlagSource::new())
        .source(EnvSource::new("usage"))
        .parse(&params)
    {
        Ok(parsed) => parsed,
        Err(err) => {
            err.parsed().write_error(&mut io::stderr(), err.violations())?;
            std::process::exit(1);
        }
    };

    parsed.usage(&mut io::stdout())?;
    Ok(())
}
