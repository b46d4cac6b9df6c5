use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::app::SatwatchApp;

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Runs one balance sync batch. Per-account failures do not fail the request.
pub async fn sync_balances(
    State(app): State<SatwatchApp>,
) -> Result<Json<SuccessResponse>, ApiError> {
    app.balance_sync().execute().await?;
    Ok(Json(SuccessResponse { success: true }))
}
