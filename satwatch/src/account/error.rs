use thiserror::Error;

use crate::primitives::AccountId;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("AccountError - Sqlx: {0}")]
    Sqlx(sqlx::Error),
    #[error("AccountError - AddressAlreadyExists: Address already exists")]
    AddressAlreadyExists,
    #[error("AccountError - NotFound: id '{0}' not found")]
    CouldNotFindById(AccountId),
}

impl From<sqlx::Error> for AccountError {
    fn from(error: sqlx::Error) -> Self {
        if let Some(err) = error.as_database_error() {
            if err.is_unique_violation() {
                if let Some(constraint) = err.constraint() {
                    if constraint.contains("address") {
                        return Self::AddressAlreadyExists;
                    }
                }
            }
        }
        Self::Sqlx(error)
    }
}
