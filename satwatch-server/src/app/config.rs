use serde::{Deserialize, Serialize};

use std::time::Duration;

use satwatch::{balance_source::BalanceSourceConfig, balance_sync::BalanceSyncConfig};

#[derive(Clone, Default, Debug, Deserialize, Serialize)]
pub struct AppConfig {
    /// Expected `X-API-Key` on the account routes. Empty rejects every request.
    #[serde(default)]
    pub admin_api_key: String,
    /// Expected `X-API-Key` on the cron routes. Empty rejects every request.
    #[serde(default)]
    pub cron_api_key: String,
    #[serde(default)]
    pub balance_sync: BalanceSyncConfig,
    #[serde(default)]
    pub balance_source: BalanceSourceConfig,
    #[serde(default)]
    pub sync_poller: SyncPollerConfig,
}

#[serde_with::serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyncPollerConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_poll_interval")]
    pub poll_interval: Duration,
}

impl Default for SyncPollerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            poll_interval: default_poll_interval(),
        }
    }
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(60)
}
