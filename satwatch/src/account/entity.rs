use chrono::{DateTime, Utc};
use derive_builder::Builder;
use regex::Regex;
use rust_decimal::Decimal;

use std::sync::OnceLock;

use crate::{primitives::*, query::SortField};

pub const NAME_MAX_LEN: usize = 255;
pub const MEMO_MAX_LEN: usize = 65535;
pub const RANK_MAX: i16 = 100;

static ADDRESS_REGEX: OnceLock<Regex> = OnceLock::new();

/// Legacy (P2PKH / P2SH) base58 address: leading `1` or `3`, 27 to 34 characters.
pub fn is_valid_address(address: &str) -> bool {
    ADDRESS_REGEX
        .get_or_init(|| {
            Regex::new(r"^[13][a-km-zA-HJ-NP-Z0-9]{26,33}$").expect("address regex compiles")
        })
        .is_match(address)
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    id: AccountId,
    address: String,
    name: String,
    rank: i16,
    memo: Option<String>,
    balance: Decimal,
    status: AccountStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self) -> i16 {
        self.rank
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct NewAccount {
    #[builder(setter(into))]
    pub(super) address: String,
    #[builder(setter(into))]
    pub(super) name: String,
    pub(super) rank: i16,
    #[builder(setter(into, strip_option), default)]
    pub(super) memo: Option<String>,
    #[builder(default)]
    pub(super) status: AccountStatus,
}

impl NewAccount {
    pub fn builder() -> NewAccountBuilder {
        NewAccountBuilder::default()
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl NewAccountBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(address) = self.address.as_ref() {
            if !is_valid_address(address) {
                return Err("Address format is wrong".to_string());
            }
        }
        if let Some(name) = self.name.as_ref() {
            if name.is_empty() {
                return Err("Name is required".to_string());
            }
            if name.chars().count() > NAME_MAX_LEN {
                return Err(format!(
                    "Name must be shorter than or equal to {NAME_MAX_LEN} characters"
                ));
            }
        }
        if let Some(rank) = self.rank {
            if !(0..=RANK_MAX).contains(&rank) {
                return Err(format!("Rank must be between 0 and {RANK_MAX}"));
            }
        }
        if let Some(Some(memo)) = self.memo.as_ref() {
            if memo.chars().count() > MEMO_MAX_LEN {
                return Err(format!(
                    "Memo must be shorter than or equal to {MEMO_MAX_LEN} characters"
                ));
            }
        }
        Ok(())
    }
}

/// Fields the account listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSortBy {
    Id,
    UpdatedAt,
}

impl AccountSortBy {
    pub const ALLOWED: [AccountSortBy; 2] = [AccountSortBy::Id, AccountSortBy::UpdatedAt];

    pub(super) fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl SortField for AccountSortBy {
    fn field_name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::UpdatedAt => "updated_at",
        }
    }
}
