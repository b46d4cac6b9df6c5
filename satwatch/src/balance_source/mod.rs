//! Confirmed on-chain balances from an external blockchain API.
mod config;
pub mod error;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

pub use config::*;
use error::*;

#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Confirmed balance of `address` in satoshi.
    async fn confirmed_balance(&self, address: &str) -> Result<i64, BalanceSourceError>;
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    confirmed: i64,
}

/// [BalanceSource] backed by the Bitcore explorer API.
#[derive(Clone, Debug)]
pub struct BitcoreClient {
    client: reqwest::Client,
    url: String,
}

impl BitcoreClient {
    pub fn new(config: BalanceSourceConfig) -> Result<Self, BalanceSourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn balance_url(&self, address: &str) -> String {
        format!("{}/address/{}/balance", self.url, address)
    }
}

#[async_trait]
impl BalanceSource for BitcoreClient {
    #[instrument(name = "satwatch.balance_source.confirmed_balance", skip(self), err)]
    async fn confirmed_balance(&self, address: &str) -> Result<i64, BalanceSourceError> {
        let url = self.balance_url(address);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BalanceSourceError::UnexpectedStatus(status, url));
        }
        let body: BalanceResponse = response.json().await?;
        Ok(body.confirmed)
    }
}
