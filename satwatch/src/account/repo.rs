use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::instrument;

use super::{entity::*, error::*, AccountFilter};
use crate::{primitives::*, query::*};

#[derive(Debug, Clone)]
pub(super) struct AccountRepo {
    pool: PgPool,
}

impl AccountRepo {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn address_exists_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        address: &str,
    ) -> Result<bool, AccountError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM satwatch_accounts WHERE address = $1)"#,
        )
        .bind(address)
        .fetch_one(&mut **tx)
        .await?;
        Ok(exists)
    }

    /// Inserts unless the address is taken. The pre-check gives the common
    /// case a cheap answer, `ON CONFLICT` covers a concurrent insert that
    /// committed after the check.
    #[instrument(
        level = "trace",
        name = "satwatch.accounts.create_in_tx",
        skip(self, tx, new_account),
        fields(address = %new_account.address)
    )]
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        new_account: NewAccount,
    ) -> Result<Account, AccountError> {
        if self.address_exists_in_tx(tx, &new_account.address).await? {
            return Err(AccountError::AddressAlreadyExists);
        }
        let account = sqlx::query_as::<_, Account>(
            r#"INSERT INTO satwatch_accounts (address, name, rank, memo, status)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (address) DO NOTHING
            RETURNING id, address, name, rank, memo, balance, status, created_at, updated_at"#,
        )
        .bind(new_account.address)
        .bind(new_account.name)
        .bind(new_account.rank)
        .bind(new_account.memo)
        .bind(new_account.status)
        .fetch_optional(&mut **tx)
        .await?;
        account.ok_or(AccountError::AddressAlreadyExists)
    }

    pub async fn find_by_id(&self, id: AccountId) -> Result<Account, AccountError> {
        sqlx::query_as::<_, Account>(
            r#"SELECT id, address, name, rank, memo, balance, status, created_at, updated_at
            FROM satwatch_accounts
            WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AccountError::CouldNotFindById(id))
    }

    pub async fn find_by_address(&self, address: &str) -> Result<Option<Account>, AccountError> {
        let account = sqlx::query_as::<_, Account>(
            r#"SELECT id, address, name, rank, memo, balance, status, created_at, updated_at
            FROM satwatch_accounts
            WHERE address = $1"#,
        )
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    pub async fn find_all_by_ids(&self, ids: &[AccountId]) -> Result<Vec<Account>, AccountError> {
        let ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();
        let accounts = sqlx::query_as::<_, Account>(
            r#"SELECT id, address, name, rank, memo, balance, status, created_at, updated_at
            FROM satwatch_accounts
            WHERE id = ANY($1)
            ORDER BY id"#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts)
    }

    pub async fn list(
        &self,
        filter: &AccountFilter,
        sort: &[Sort<AccountSortBy>],
        page: OffsetPaginatedArgs,
    ) -> Result<OffsetPaginatedRet<Account>, AccountError> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT id, address, name, rank, memo, balance, status, created_at, updated_at \
             FROM satwatch_accounts",
        );
        push_filter(&mut query, filter);
        push_order_by(&mut query, sort);
        query
            .push(" LIMIT ")
            .push_bind(page.count)
            .push(" OFFSET ")
            .push_bind(page.offset);
        let entities = query
            .build_query_as::<Account>()
            .fetch_all(&self.pool)
            .await?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM satwatch_accounts");
        push_filter(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(OffsetPaginatedRet { entities, total })
    }

    pub async fn list_for_sync(&self, batch_size: i64) -> Result<Vec<Account>, AccountError> {
        let accounts = sqlx::query_as::<_, Account>(
            r#"SELECT id, address, name, rank, memo, balance, status, created_at, updated_at
            FROM satwatch_accounts
            WHERE status = $1
            ORDER BY updated_at ASC, id ASC
            LIMIT $2"#,
        )
        .bind(AccountStatus::On)
        .bind(batch_size)
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts)
    }

    pub async fn update_balance(
        &self,
        id: AccountId,
        balance: Decimal,
    ) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"UPDATE satwatch_accounts
            SET balance = $2, updated_at = GREATEST(updated_at, NOW())
            WHERE id = $1"#,
        )
        .bind(id)
        .bind(balance)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AccountError::CouldNotFindById(id));
        }
        Ok(())
    }

    pub async fn update_status(
        &self,
        id: AccountId,
        status: AccountStatus,
    ) -> Result<Account, AccountError> {
        sqlx::query_as::<_, Account>(
            r#"UPDATE satwatch_accounts
            SET status = $2, updated_at = GREATEST(updated_at, NOW())
            WHERE id = $1
            RETURNING id, address, name, rank, memo, balance, status, created_at, updated_at"#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AccountError::CouldNotFindById(id))
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &AccountFilter) {
    query.push(" WHERE TRUE");
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status);
    }
    if let Some(pattern) = filter.search.as_deref().and_then(search_pattern) {
        query
            .push(" AND (address ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR memo ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

fn push_order_by(query: &mut QueryBuilder<'_, Postgres>, sort: &[Sort<AccountSortBy>]) {
    query.push(" ORDER BY ");
    let mut keys = query.separated(", ");
    for key in sort {
        keys.push(key.by.column());
        keys.push_unseparated(" ");
        keys.push_unseparated(key.direction.as_sql());
    }
    // id breaks ties so pages stay stable between calls
    if !sort.iter().any(|key| key.by == AccountSortBy::Id) {
        keys.push("id ASC");
    }
}

/// Substring `ILIKE` pattern with the wildcard characters of `search` escaped.
fn search_pattern(search: &str) -> Option<String> {
    if search.is_empty() {
        return None;
    }
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}
