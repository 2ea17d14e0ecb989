use serde::{Deserialize, Serialize};
use serde_envfile::Error;
use ui_store::StoreConfig;

#[derive(Serialize, Deserialize, Debug)]
pub struct Config {
    pub discord_token: String,
    pub store_timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        serde_envfile::from_env()
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            timeout_secs: self
                .store_timeout_secs
                .or(StoreConfig::default().timeout_secs),
        }
    }
}
