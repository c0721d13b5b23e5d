use lead_capture::configuration::get_configuration;
use lead_capture::configuration::Settings;
use lead_capture::startup::Application;
use lead_capture::telemetry::get_subscriber;
use lead_capture::telemetry::init_subscriber;
use once_cell::sync::Lazy;
use secrecy::Secret;
use serde_json::json;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "xkeysib-test";

/// Init the tracing subscriber once for the whole test binary.
///
/// To opt in to verbose logging, use the env var `TEST_LOG`:
///
/// ```sh
///      TEST_LOG=true cargo test [test_name] | bunyan
/// ```
static TRACING: Lazy<()> = Lazy::new(|| {
    // `stdout` and `sink` are different closure types, hence the two arms
    match std::env::var("TEST_LOG") {
        Ok(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::stdout);
            init_subscriber(subscriber).expect("init tracing");
        }
        Err(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::sink);
            init_subscriber(subscriber).expect("init tracing");
        }
    };
});

pub struct TestApp {
    pub addr: String,
    pub port: u16,
    /// Stands in for the contact provider; mocks mounted here are verified when
    /// the `TestApp` is dropped
    pub provider_server: MockServer,
}

impl TestApp {
    pub async fn post_subscribe(
        &self,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.post_raw(body.to_string()).await
    }

    pub async fn post_raw(
        &self,
        body: String,
    ) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/api/subscribe", self.addr))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("execute request")
    }
}

/// The lead from the marketing site's own happy path
pub fn valid_body() -> serde_json::Value {
    json!({
        "name": "John Doe",
        "email": "john@example.com",
        "phone": "+14155552671",
        "message": "Need a site",
    })
}

pub async fn spawn_app() -> TestApp { spawn_app_with(|_| {}).await }

/// Spawn the app on a random port, with the provider pointed at a fresh
/// `MockServer` and a known API key. `tweak` may override any of that.
pub async fn spawn_app_with(tweak: impl FnOnce(&mut Settings)) -> TestApp {
    Lazy::force(&TRACING);

    let provider_server = MockServer::start().await;

    let cfg = {
        let mut cfg = get_configuration().expect("read configuration");
        // port 0 is reserved by the OS; the server will be bound to a random
        // available port, retrieved later via `Application::get_port`
        cfg.application.port = 0;
        cfg.provider.base_url = provider_server.uri();
        cfg.provider.api_key = Some(Secret::new(TEST_API_KEY.to_string()));
        cfg.provider.timeout_milliseconds = 500;
        tweak(&mut cfg);
        cfg
    };

    let app = Application::build(cfg).await.expect("build app");
    let port = app.get_port();
    let addr = format!("http://127.0.0.1:{port}");
    tokio::spawn(app.run_until_stopped());

    TestApp {
        addr,
        port,
        provider_server,
    }
}
