use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BalanceSyncConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
}

impl Default for BalanceSyncConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

fn default_batch_size() -> u32 {
    5
}
