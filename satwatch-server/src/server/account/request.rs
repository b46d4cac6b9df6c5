use serde::Deserialize;

use satwatch::{account::*, query::*, AccountStatus};

use crate::server::error::ApiError;

pub const DEFAULT_OFFSET: i64 = 0;
pub const DEFAULT_COUNT: i64 = 100;
pub const MAX_COUNT: i64 = 100;
const ORDER_BY_MAX_LEN: usize = 255;
const SEARCH_MAX_LEN: usize = 255;
const ORDER_BY_SEPARATOR: char = ',';

fn invalid_status() -> ApiError {
    let values = AccountStatus::ALL
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(",");
    ApiError::BadRequest(format!("Status must be one of the next values: {values}"))
}

/// Raw `GET /account` query. Everything arrives as text so each problem can be
/// reported with its own message.
#[derive(Debug, Default, Deserialize)]
pub struct ListAccountsQuery {
    pub offset: Option<String>,
    pub count: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    pub search: Option<String>,
}

impl ListAccountsQuery {
    pub fn into_list_args(self) -> Result<AccountListArgs, ApiError> {
        let offset = parse_number(self.offset.as_deref(), "offset")?.unwrap_or(DEFAULT_OFFSET);
        let count = parse_number(self.count.as_deref(), "count")?.unwrap_or(DEFAULT_COUNT);
        if offset < 0 {
            return Err(ApiError::BadRequest(
                "Offset must be greater than or equal 0".to_string(),
            ));
        }
        if count < 1 {
            return Err(ApiError::BadRequest(
                "Count must be greater than or equal 1".to_string(),
            ));
        }
        if count > MAX_COUNT {
            return Err(ApiError::BadRequest(format!(
                "Count must be less than or equal {MAX_COUNT}"
            )));
        }

        let status = match self.status.as_deref().map(|s| s.trim_matches('"')) {
            None | Some("") => None,
            Some(status) => Some(status.parse::<AccountStatus>().map_err(|_| invalid_status())?),
        };

        let order_by = self.order_by.unwrap_or_default();
        if order_by.chars().count() > ORDER_BY_MAX_LEN {
            return Err(ApiError::BadRequest(format!(
                "OrderBy must be shorter than or equal to {ORDER_BY_MAX_LEN} characters"
            )));
        }
        let search = self.search.filter(|s| !s.is_empty());
        if search
            .as_ref()
            .is_some_and(|s| s.chars().count() > SEARCH_MAX_LEN)
        {
            return Err(ApiError::BadRequest(format!(
                "Search must be shorter than or equal to {SEARCH_MAX_LEN} characters"
            )));
        }

        let sort = resolve_order_by(&order_by, ORDER_BY_SEPARATOR, &AccountSortBy::ALLOWED)?;

        Ok(AccountListArgs {
            filter: AccountFilter { status, search },
            sort,
            page: OffsetPaginatedArgs { offset, count },
        })
    }
}

fn parse_number(value: Option<&str>, field: &str) -> Result<Option<i64>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("{field} is invalid"))),
    }
}

/// `POST /account` body.
#[derive(Debug, Default, Deserialize)]
pub struct CreateAccountRequest {
    pub address: Option<String>,
    pub name: Option<String>,
    pub rank: Option<i64>,
    pub memo: Option<String>,
    pub status: Option<String>,
}

impl CreateAccountRequest {
    /// Fields are checked in declaration order and the first problem is reported.
    pub fn into_new_account(self) -> Result<NewAccount, ApiError> {
        let mut builder = NewAccount::builder();
        builder
            .address(self.address.unwrap_or_default())
            .name(self.name.unwrap_or_default());
        if let Some(rank) = self.rank {
            // anything outside i16 is out of range as well
            builder.rank(i16::try_from(rank).unwrap_or(i16::MAX));
        }
        if let Some(memo) = self.memo {
            builder.memo(memo);
        }
        let status = self
            .status
            .as_deref()
            .and_then(|s| s.parse::<AccountStatus>().ok());
        if let Some(status) = status {
            builder.status(status);
        }

        let new_account = builder.build().map_err(|e| match e {
            NewAccountBuilderError::ValidationError(msg) => ApiError::BadRequest(msg),
            NewAccountBuilderError::UninitializedField("rank") => {
                ApiError::BadRequest("Rank is required".to_string())
            }
            e => ApiError::BadRequest(e.to_string()),
        })?;
        if status.is_none() {
            return Err(invalid_status());
        }
        Ok(new_account)
    }
}
