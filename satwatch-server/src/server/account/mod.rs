mod request;
mod response;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};

use super::error::ApiError;
use crate::app::SatwatchApp;

pub use request::*;
pub use response::*;

pub async fn list(
    State(app): State<SatwatchApp>,
    query: Result<Query<ListAccountsQuery>, QueryRejection>,
) -> Result<Json<ListAccountsResponse>, ApiError> {
    let Query(query) =
        query.map_err(|_| ApiError::BadRequest("Invalid request query".to_string()))?;
    let args = query.into_list_args()?;
    let (offset, count) = (args.page.offset, args.page.count);

    let page = app.accounts().list(args).await?;
    Ok(Json(ListAccountsResponse {
        offset,
        count,
        total: page.total,
        list: page.entities.into_iter().map(AccountDto::from).collect(),
    }))
}

pub async fn create(
    State(app): State<SatwatchApp>,
    body: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<Json<AccountDto>, ApiError> {
    let Json(body) =
        body.map_err(|_| ApiError::BadRequest("Invalid request body".to_string()))?;
    let new_account = body.into_new_account()?;

    let account = app.accounts().create(new_account).await?;
    Ok(Json(AccountDto::from(account)))
}
