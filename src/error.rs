//! Error handling for the application

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Package not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Invalid query string: {0}")]
    InvalidQuery(#[from] QueryRejection),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Pricing(PricingError::InvalidConfiguration { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Pricing(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidBody(rejection) => rejection.status(),
            AppError::InvalidQuery(rejection) => rejection.status(),
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::NotFound => PricingErrorResponse {
                error_type: "not_found".to_string(),
                message: "Package not found".to_string(),
                details: None,
            },
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                PricingErrorResponse {
                    error_type: "database".to_string(),
                    message: "Database error".to_string(),
                    details: None,
                }
            }
            AppError::Pricing(e) => {
                if status.is_server_error() {
                    tracing::error!("Pricing error: {}", e);
                } else {
                    tracing::debug!("Rejected pricing request: {}", e);
                }
                PricingErrorResponse::from(e)
            }
            AppError::InvalidBody(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                PricingErrorResponse {
                    error_type: "invalid_body".to_string(),
                    message: rejection.body_text(),
                    details: None,
                }
            }
            AppError::InvalidQuery(rejection) => {
                tracing::debug!("Rejected query string: {}", rejection.body_text());
                PricingErrorResponse {
                    error_type: "invalid_query".to_string(),
                    message: rejection.body_text(),
                    details: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
