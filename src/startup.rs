use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::web;
use actix_web::App;
use actix_web::HttpServer;
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::provider_client::ProviderClient;
use crate::routes::health_check;
use crate::routes::subscribe;

/// Wrapper for actix's `Server` with access to the bound port. Not to be
/// confused with actix's `App`!
pub struct Application {
    /// Left private; use `get_port` to access
    port: u16,
    server: Server,
}

impl Application {
    /// Bind the configured address and build the `Server`. Port 0 binds a
    /// random free port (see `get_port`).
    pub async fn build(cfg: Settings) -> Result<Self, anyhow::Error> {
        let addr = format!("{}:{}", cfg.application.host, cfg.application.port);
        let listener = TcpListener::bind(addr)?;
        let port = listener.local_addr()?.port();

        if cfg.provider.api_key.is_none() {
            // not fatal: every submission will be answered with 500 instead
            tracing::warn!("no provider API key configured; submissions will be rejected");
        }
        let provider_client = cfg.provider.client()?;

        let server = run(listener, provider_client)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 { self.port }

    /// Because this consumes `self`, this should be the final function call (or
    /// passed to `tokio::spawn`)
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> { self.server.await }
}

/// The server is not responsible for binding to an address, it only listens to
/// an already bound address.
///
/// Declares all API endpoints.
pub fn run(
    listener: TcpListener,
    provider_client: ProviderClient,
) -> Result<Server, anyhow::Error> {
    // `Data` is an `Arc`; every worker gets a clone of the same client (and
    // thus the same connection pool and credential)
    let provider_client = web::Data::new(provider_client);

    // the closure is run once per worker thread, hence the clones
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/api/subscribe", web::post().to(subscribe))
            .app_data(provider_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
