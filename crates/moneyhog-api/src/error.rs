//! Error types for moneyhog-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use moneyhog_core::{CoreError, ErrorCode, ErrorDetails};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(e) => match e.code() {
                ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn to_details(&self) -> ErrorDetails {
        match self {
            ApiError::BadRequest { message } => {
                ErrorDetails::new(ErrorCode::ValidationError, message.clone())
            }
            ApiError::Core(e) => e.to_details(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::debug!("Request rejected: {}", self);
        }
        (status, Json(self.to_details())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
