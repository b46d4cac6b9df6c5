mod config;
mod error;

use sqlx::PgPool;

use std::sync::Arc;

pub use config::*;
pub use error::*;

use crate::{
    account::Accounts,
    balance_source::{BalanceSource, BitcoreClient},
    balance_sync::BalanceSync,
};

/// Entry point of the library: owns the pool and wires the services onto it.
#[derive(Clone)]
pub struct AccountBook {
    pool: PgPool,
    accounts: Accounts,
    balance_sync: BalanceSync,
}

impl AccountBook {
    pub async fn init(config: AccountBookConfig) -> Result<Self, AccountBookError> {
        let pool = match (config.pool, config.pg_con) {
            (Some(pool), None) => pool,
            (None, Some(pg_con)) => {
                let mut pool_opts = sqlx::postgres::PgPoolOptions::new();
                if let Some(max_connections) = config.max_connections {
                    pool_opts = pool_opts.max_connections(max_connections);
                }
                pool_opts.connect(&pg_con).await?
            }
            _ => {
                return Err(AccountBookError::ConfigError(
                    "One of pg_con or pool must be set".to_string(),
                ))
            }
        };
        if config.exec_migrations {
            sqlx::migrate!().run(&pool).await?;
        }

        let source: Arc<dyn BalanceSource> =
            Arc::new(BitcoreClient::new(config.balance_source)?);
        let accounts = Accounts::new(&pool);
        let balance_sync = BalanceSync::new(&accounts, source, config.balance_sync);
        Ok(Self {
            pool,
            accounts,
            balance_sync,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    pub fn balance_sync(&self) -> &BalanceSync {
        &self.balance_sync
    }
}
