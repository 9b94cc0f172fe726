use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("invalid date '{value}', expected YYYY-MM-DD: {reason}")]
    InvalidDateFormat { value: String, reason: String },
    #[error("climate dataset unavailable: {0}")]
    DataStoreUnavailable(#[from] db::Error),
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidDateFormat { .. } => StatusCode::BAD_REQUEST,
            ApiError::DataStoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::InvalidDateFormat { .. } => {
                warn!("rejecting request: {}", self);
                self.to_string()
            }
            ApiError::DataStoreUnavailable(e) => {
                error!("error querying climate dataset: {}", e);
                String::from("climate dataset unavailable")
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
