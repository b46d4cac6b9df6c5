use thiserror::Error;

use crate::balance_source::error::BalanceSourceError;

#[derive(Error, Debug)]
pub enum AccountBookError {
    #[error("AccountBookError - Sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("AccountBookError - Migrate: {0}")]
    SqlxMigrate(#[from] sqlx::migrate::MigrateError),
    #[error("AccountBookError - Config: {0}")]
    ConfigError(String),
    #[error("AccountBookError - BalanceSourceError: {0}")]
    BalanceSourceError(#[from] BalanceSourceError),
}
