//! Logging setup for binaries using hotparam
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is up to the application. [`init`] is a reasonable default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a compact stderr subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `info`. Colors are only
/// used when stderr is a terminal.
///
/// # Errors
///
/// Fails when the filter cannot be parsed or a global subscriber is already
/// installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    init_with_filter(filter)
}

/// Install a compact stderr subscriber with explicit filter directives,
/// such as `"hotparam_config=debug"`.
///
/// # Errors
///
/// Fails when the directives cannot be parsed or a global subscriber is
/// already installed.
pub fn init_with_directives(
    directives: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    init_with_filter(EnvFilter::try_new(directives)?)
}

fn init_with_filter(
    filter: EnvFilter,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}
