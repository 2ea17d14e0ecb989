use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_envfile::Error;

pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// Seconds since the last handled interaction until `listen` returns,
    /// `None` listens until stopped.
    pub timeout_secs: Option<u64>,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, Error> {
        serde_envfile::from_env()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_test() {
        assert_eq!(
            StoreConfig::default().timeout(),
            Some(Duration::from_secs(180))
        );
        assert_eq!(StoreConfig { timeout_secs: None }.timeout(), None);
    }
}
