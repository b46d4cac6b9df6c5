mod config;
mod error;

use std::{sync::Arc, time::Duration};

use satwatch::{account::Accounts, balance_sync::BalanceSync, AccountBook};

pub use config::*;
pub use error::*;

#[derive(Clone)]
pub struct SatwatchApp {
    book: AccountBook,
    config: Arc<AppConfig>,
    _sync_poller: Option<Arc<SyncPollerHandle>>,
}

impl SatwatchApp {
    pub async fn run(book: AccountBook, config: AppConfig) -> Result<Self, ApplicationError> {
        let mut sync_poller = None;
        if config.sync_poller.enabled {
            let poll_interval = config.sync_poller.poll_interval;
            if poll_interval.is_zero() {
                return Err(ApplicationError::InvalidPollInterval(
                    "sync_poller.poll_interval must be at least 1 second".to_string(),
                ));
            }
            sync_poller = Some(Arc::new(Self::start_sync_poller(
                book.balance_sync().clone(),
                poll_interval,
            )));
        }
        Ok(Self {
            book,
            config: Arc::new(config),
            _sync_poller: sync_poller,
        })
    }

    fn start_sync_poller(balance_sync: BalanceSync, poll_interval: Duration) -> SyncPollerHandle {
        tracing::info!(
            poll_interval_secs = poll_interval.as_secs(),
            "starting balance sync poller"
        );
        let handle = tokio::spawn(async move {
            loop {
                if let Err(e) = balance_sync.execute().await {
                    tracing::error!(error = %e, "scheduled balance sync failed");
                }
                tokio::time::sleep(poll_interval).await;
            }
        });
        SyncPollerHandle(handle)
    }

    pub fn accounts(&self) -> &Accounts {
        self.book.accounts()
    }

    pub fn balance_sync(&self) -> &BalanceSync {
        self.book.balance_sync()
    }

    pub fn admin_api_key(&self) -> &str {
        &self.config.admin_api_key
    }

    pub fn cron_api_key(&self) -> &str {
        &self.config.cron_api_key
    }
}

struct SyncPollerHandle(tokio::task::JoinHandle<()>);

impl Drop for SyncPollerHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}
