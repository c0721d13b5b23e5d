use tracing::subscriber::set_global_default;
use tracing::subscriber::SetGlobalDefaultError;
use tracing::Subscriber;
use tracing_bunyan_formatter::BunyanFormattingLayer;
use tracing_bunyan_formatter::JsonStorageLayer;
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

/// Build a bunyan (JSON lines) `tracing` subscriber. `RUST_LOG` takes
/// precedence over `filter_level`.
///
/// Note: `sink` must be a closure (e.g. `std::io::stdout`), not a return value.
pub fn get_subscriber<Sink>(
    name: &str,
    filter_level: &str,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    // sink must implement `MakeWriter` for all choices of the lifetime `'a`
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_level));
    let fmt_layer = BunyanFormattingLayer::new(name.to_string(), sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(fmt_layer)
}

#[derive(thiserror::Error, Debug)]
pub enum TelemetryError {
    #[error("failed to redirect `log` records")]
    Log(#[from] tracing_log::log::SetLoggerError),
    #[error("a global subscriber is already set")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Install `subscriber` globally. Must be called once, before the server is
/// built, or request spans will be lost.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<(), TelemetryError> {
    // actix-web (and reqwest) emit through `log`, not `tracing`
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}
