use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Settings every service shares. Services embed this with `#[serde(flatten)]`.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Name reported by the `/api/ping` endpoint.
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

fn default_port() -> u16 {
    8080
}

fn default_app_name() -> String {
    "wicwug".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            app_name: default_app_name(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        load_layered()
    }
}

/// Load any service configuration from `.env`, an optional `configuration.*`
/// file and `APP__`-prefixed environment variables, in increasing precedence.
pub fn load_layered<T: DeserializeOwned>() -> Result<T, AppError> {
    dotenvy::dotenv().ok();
    from_environment(app_environment())
}

fn app_environment() -> Environment {
    Environment::with_prefix("APP")
        .separator("__")
        .try_parsing(true)
}

fn from_environment<T: DeserializeOwned>(environment: Environment) -> Result<T, AppError> {
    let config = Cfg::builder()
        .add_source(File::with_name("configuration").required(false))
        .add_source(environment)
        .build()?;

    Ok(config.try_deserialize()?)
}
