use thiserror::Error;

#[derive(Error, Debug)]
pub enum BalanceSyncError {
    #[error("BalanceSyncError - AccountError: {0}")]
    AccountError(#[from] crate::account::error::AccountError),
    #[error("BalanceSyncError - BalanceSourceError: {0}")]
    BalanceSourceError(#[from] crate::balance_source::error::BalanceSourceError),
}
