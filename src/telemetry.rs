use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Compose a bunyan JSON subscriber writing to `sink`.
///
/// `RUST_LOG` wins over `env_filter` when set. The CLI passes `std::io::stderr`
/// so stdout stays reserved for command output.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name, sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Install `subscriber` globally and route `log` records into it.
pub fn init_subscriber(
    subscriber: impl Subscriber + Send + Sync,
) -> Result<(), Box<dyn std::error::Error>> {
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}
