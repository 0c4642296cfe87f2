use miette::{IntoDiagnostic, Result, WrapErr};

/// env var holding an [`tracing_subscriber::EnvFilter`] directive, like `debug` or `gw2api=trace`
pub const LOG_ENV: &str = "GW2API_LOG";

/// Install a stderr `fmt` subscriber filtered by `GW2API_LOG` (default `info`).
/// Applications that already set up `tracing` should skip this.
pub fn install_tracing() -> Result<()> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};
    // get the log level
    let filter_layer = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new("info"))
        .into_diagnostic()
        .wrap_err("failed to build log filter")?;
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("failed to install tracing subscriber")?;
    Ok(())
}
