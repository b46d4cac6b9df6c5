//! [Account] tracks the balance of a single bitcoin address.
mod entity;
pub mod error;
mod repo;

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use crate::{primitives::*, query::*};

pub use entity::*;
use error::*;
use repo::*;

#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    pub status: Option<AccountStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AccountListArgs {
    pub filter: AccountFilter,
    pub sort: Vec<Sort<AccountSortBy>>,
    pub page: OffsetPaginatedArgs,
}

/// Service for working with `Account` entities.
#[derive(Clone)]
pub struct Accounts {
    repo: AccountRepo,
    pool: PgPool,
}

impl Accounts {
    pub(crate) fn new(pool: &PgPool) -> Self {
        Self {
            repo: AccountRepo::new(pool),
            pool: pool.clone(),
        }
    }

    #[instrument(name = "satwatch.accounts.create", skip(self), err(level = "warn"))]
    pub async fn create(&self, new_account: NewAccount) -> Result<Account, AccountError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL READ COMMITTED")
            .execute(&mut *tx)
            .await?;
        let account = self.repo.create_in_tx(&mut tx, new_account).await?;
        tx.commit().await?;
        Ok(account)
    }

    #[instrument(name = "satwatch.accounts.list", skip(self), err)]
    pub async fn list(
        &self,
        args: AccountListArgs,
    ) -> Result<OffsetPaginatedRet<Account>, AccountError> {
        self.repo.list(&args.filter, &args.sort, args.page).await
    }

    #[instrument(name = "satwatch.accounts.find_by_id", skip(self), err)]
    pub async fn find_by_id(&self, id: AccountId) -> Result<Account, AccountError> {
        self.repo.find_by_id(id).await
    }

    #[instrument(name = "satwatch.accounts.find_by_address", skip(self), err)]
    pub async fn find_by_address(&self, address: &str) -> Result<Option<Account>, AccountError> {
        self.repo.find_by_address(address).await
    }

    #[instrument(name = "satwatch.accounts.find_all_by_ids", skip(self), err)]
    pub async fn find_all_by_ids(&self, ids: &[AccountId]) -> Result<Vec<Account>, AccountError> {
        self.repo.find_all_by_ids(ids).await
    }

    /// Active accounts that have waited longest since their last update.
    #[instrument(name = "satwatch.accounts.list_for_sync", skip(self), err)]
    pub async fn list_for_sync(&self, batch_size: u32) -> Result<Vec<Account>, AccountError> {
        self.repo.list_for_sync(i64::from(batch_size)).await
    }

    #[instrument(name = "satwatch.accounts.update_balance", skip(self), err)]
    pub async fn update_balance(
        &self,
        id: AccountId,
        balance: Decimal,
    ) -> Result<(), AccountError> {
        self.repo.update_balance(id, balance).await
    }

    #[instrument(name = "satwatch.accounts.update_status", skip(self), err)]
    pub async fn update_status(
        &self,
        id: AccountId,
        status: AccountStatus,
    ) -> Result<Account, AccountError> {
        self.repo.update_status(id, status).await
    }
}
