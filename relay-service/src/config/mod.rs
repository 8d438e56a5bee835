use serde::Deserialize;
use service_core::broker::BrokerConfig;
use service_core::config as core_config;
use service_core::error::AppError;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RelayConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    #[serde(default)]
    pub broker: BrokerConfig,
}

impl RelayConfig {
    /// Reads `APP__PORT`, `APP__BROKER__URL`, `APP__BROKER__QUEUE`, ... on top of the defaults.
    pub fn load() -> Result<Self, AppError> {
        core_config::load_layered()
    }
}
