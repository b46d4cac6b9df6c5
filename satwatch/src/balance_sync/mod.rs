//! Refreshes stored balances from a [BalanceSource].
//!
//! Each run picks the active accounts that have gone longest without an
//! update, fetches their confirmed balance and persists it. A failure on one
//! account is logged and does not stop the rest of the batch.
mod config;
pub mod error;

use tracing::{instrument, Instrument};

use std::sync::Arc;

use crate::{
    account::{Account, Accounts},
    balance_source::BalanceSource,
    currency,
};

pub use config::*;
use error::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceSyncSummary {
    pub selected: usize,
    pub updated: usize,
    pub failed: usize,
}

#[derive(Clone)]
pub struct BalanceSync {
    accounts: Accounts,
    source: Arc<dyn BalanceSource>,
    config: BalanceSyncConfig,
}

impl BalanceSync {
    pub fn new(
        accounts: &Accounts,
        source: Arc<dyn BalanceSource>,
        config: BalanceSyncConfig,
    ) -> Self {
        Self {
            accounts: accounts.clone(),
            source,
            config,
        }
    }

    #[instrument(name = "satwatch.balance_sync.execute", skip(self), err)]
    pub async fn execute(&self) -> Result<BalanceSyncSummary, BalanceSyncError> {
        let batch = self.accounts.list_for_sync(self.config.batch_size).await?;
        let mut summary = BalanceSyncSummary {
            selected: batch.len(),
            ..Default::default()
        };
        for account in batch {
            let span = tracing::info_span!(
                "satwatch.balance_sync.account",
                account_id = %account.id(),
                address = %account.address(),
            );
            match self.sync_account(&account).instrument(span).await {
                Ok(()) => summary.updated += 1,
                Err(e) => {
                    tracing::error!(
                        account_id = %account.id(),
                        address = %account.address(),
                        error = %e,
                        "could not sync account balance"
                    );
                    summary.failed += 1;
                }
            }
        }
        tracing::info!(
            selected = summary.selected,
            updated = summary.updated,
            failed = summary.failed,
            "balance sync finished"
        );
        Ok(summary)
    }

    async fn sync_account(&self, account: &Account) -> Result<(), BalanceSyncError> {
        let satoshi = self.source.confirmed_balance(account.address()).await?;
        let balance = currency::from_satoshi(satoshi);
        self.accounts.update_balance(account.id(), balance).await?;
        tracing::debug!(%balance, "balance updated");
        Ok(())
    }
}
