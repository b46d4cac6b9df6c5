use serde::{Deserialize, Serialize};

use std::time::Duration;

#[serde_with::serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BalanceSourceConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,
}

impl Default for BalanceSourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_url() -> String {
    "https://api.bitcore.io/api/BTC/mainnet".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(20)
}
