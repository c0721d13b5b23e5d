use std::env;
use std::env::current_dir;
use std::fmt::Display;
use std::time::Duration;

use config::Config;
use config::ConfigError;
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::provider_client::ProviderClient;

/// Global configuration, loaded from `configuration/*.yaml` and `APP_*` env
/// vars. See `get_configuration`.
#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub provider: ProviderSettings,
}

/// Server configuration
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    /// Should be localhost on dev machine, 0.0.0.0 on prod
    pub host: String,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

/// Contact-list provider configuration
#[derive(Deserialize, Clone)]
pub struct ProviderSettings {
    pub base_url: String,

    /// Never stored in the yaml files; supply `APP_PROVIDER__API_KEY` or
    /// `BREVO_API_KEY`. Missing is allowed at startup: every submission will
    /// then be answered with a misconfiguration error.
    #[serde(default)]
    pub api_key: Option<Secret<String>>,

    /// Target marketing list for new contacts
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub list_id: u64,

    /// Update an existing contact with the same email instead of failing
    pub update_enabled: bool,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration { Duration::from_millis(self.timeout_milliseconds) }

    pub fn client(self) -> Result<ProviderClient, reqwest::Error> {
        let timeout = self.timeout();
        ProviderClient::new(
            self.base_url,
            self.api_key,
            self.list_id,
            self.update_enabled,
            timeout,
        )
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Display for Environment {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Environment::Local => "local",
                Environment::Production => "production",
            }
        )?;
        Ok(())
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            e => Err(format!("Invalid environment: {e}")),
        }
    }
}

/// Load yaml configuration files at `<project_root>/configuration`: first
/// `base.yaml`, then `{APP_ENVIRONMENT}.yaml` (default `local`), then `APP_*`
/// env vars, e.g.
///
/// `APP_APPLICATION__PORT=5001` -> `Settings.application.port`
///
/// All fields except the provider API key must be present, otherwise
/// initialisation fails immediately and the server does not start.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let cfg_dir = current_dir()
        .map_err(|e| ConfigError::Foreign(Box::new(e)))?
        .join("configuration");

    let env: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or("local".to_string())
        .try_into()
        .map_err(ConfigError::Message)?;

    tracing::info!("loading config for {env} env");

    let settings = Config::builder()
        .add_source(config::File::from(cfg_dir.join("base.yaml")))
        .add_source(config::File::from(cfg_dir.join(format!("{env}.yaml"))))
        // env vars are -always- parsed as String, hence `serde-aux` for numeric
        // fields
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        // the name most hosting dashboards already have for it
        .set_override_option("provider.api_key", env::var("BREVO_API_KEY").ok())?
        .build()?;

    settings.try_deserialize::<Settings>()
}
