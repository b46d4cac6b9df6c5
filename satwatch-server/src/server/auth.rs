use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use super::error::ApiError;
use crate::app::SatwatchApp;

pub const API_KEY_HEADER: &str = "x-api-key";

fn has_key(headers: &HeaderMap, expected: &str) -> bool {
    if expected.is_empty() {
        return false;
    }
    headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|key| !key.is_empty() && key == expected)
}

pub async fn require_admin_key(
    State(app): State<SatwatchApp>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !has_key(req.headers(), app.admin_api_key()) {
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(req).await)
}

pub async fn require_cron_key(
    State(app): State<SatwatchApp>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !has_key(req.headers(), app.cron_api_key()) {
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(req).await)
}
