use lead_capture::configuration::get_configuration;
use lead_capture::startup::Application;
use lead_capture::telemetry::get_subscriber;
use lead_capture::telemetry::init_subscriber;

/// Initialise telemetry, load config, and start the server
#[tokio::main] // requires tokio features: macros, rt-multi-thread
async fn main() -> Result<(), anyhow::Error> {
    // RUST_LOG overrides the default level
    let subscriber = get_subscriber("lead-capture", "info", std::io::stdout);
    init_subscriber(subscriber)?;

    let cfg = get_configuration()?;

    let app = Application::build(cfg).await?;
    tracing::info!("listening on port {}", app.get_port());
    app.run_until_stopped().await?;

    Ok(())
}
