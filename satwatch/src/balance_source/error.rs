use thiserror::Error;

#[derive(Error, Debug)]
pub enum BalanceSourceError {
    #[error("BalanceSourceError - Reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("BalanceSourceError - UnexpectedStatus: {0} from {1}")]
    UnexpectedStatus(reqwest::StatusCode, String),
}
