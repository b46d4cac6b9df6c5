use serde::{Deserialize, Serialize};

use satwatch::{account::Account, AccountId, AccountStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDto {
    pub id: AccountId,
    pub address: String,
    pub name: String,
    pub rank: i16,
    pub memo: Option<String>,
    /// Decimal string without trailing zeros, `"0"` for an empty balance.
    pub balance: String,
    pub status: AccountStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id(),
            address: account.address().to_string(),
            name: account.name().to_string(),
            rank: account.rank(),
            memo: account.memo().map(str::to_string),
            balance: account.balance().normalize().to_string(),
            status: account.status(),
            created_at: account.created_at().timestamp(),
            updated_at: account.updated_at().timestamp(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListAccountsResponse {
    pub offset: i64,
    pub count: i64,
    pub total: i64,
    pub list: Vec<AccountDto>,
}
