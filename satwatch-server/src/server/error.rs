use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use satwatch::{
    account::error::AccountError, balance_sync::error::BalanceSyncError, query::OrderByError,
};

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("ApiError - BadRequest: {0}")]
    BadRequest(String),
    #[error("ApiError - Unauthorized")]
    Unauthorized,
    #[error("ApiError - NotFound: {0}")]
    NotFound(String),
    #[error("ApiError - MethodNotAllowed")]
    MethodNotAllowed,
    #[error("ApiError - Conflict: {0}")]
    Conflict(String),
    #[error("ApiError - Internal: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Internal details are only logged.
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::Conflict(msg) => msg,
            Self::Unauthorized => "Unauthorized",
            Self::MethodNotAllowed => "Method not allowed",
            Self::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            tracing::error!(error = %detail, "request failed");
        }
        let body = ErrorResponse {
            success: false,
            message: self.message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(error: AccountError) -> Self {
        match error {
            AccountError::AddressAlreadyExists => Self::Conflict("Address already exists".into()),
            AccountError::CouldNotFindById(_) => Self::NotFound("Account not found".into()),
            e => Self::Internal(e.to_string()),
        }
    }
}

impl From<OrderByError> for ApiError {
    fn from(error: OrderByError) -> Self {
        Self::BadRequest(error.to_string())
    }
}

impl From<BalanceSyncError> for ApiError {
    fn from(error: BalanceSyncError) -> Self {
        Self::Internal(error.to_string())
    }
}
