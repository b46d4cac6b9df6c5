use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("ApplicationError - InvalidPollInterval: {0}")]
    InvalidPollInterval(String),
}
