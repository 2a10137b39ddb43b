//! Error types for the library dashboard server

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::enums::CardStatus;

/// Stable error codes returned in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchCard = 4,
    NoSuchBook = 5,
    BookAlreadyCheckedOut = 7,
    NoSuchData = 8,
    CardInactive = 11,
    BadValue = 18,
}

/// Rejected checkout/return transitions.
///
/// Every variant is a user-correctable condition; none is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CirculationError {
    #[error("Book {isbn} not found")]
    BookNotFound { isbn: String },

    #[error("Library card {card_id} not found")]
    CardNotFound { card_id: i32 },

    #[error("'{title}' is already checked out")]
    AlreadyCheckedOut { isbn: String, title: String },

    #[error("Card for {name} is not Active (Status: {status})")]
    CardInactive {
        card_id: i32,
        name: String,
        status: CardStatus,
    },
}

impl CirculationError {
    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            CirculationError::BookNotFound { .. } => (StatusCode::NOT_FOUND, ErrorCode::NoSuchBook),
            CirculationError::CardNotFound { .. } => (StatusCode::NOT_FOUND, ErrorCode::NoSuchCard),
            CirculationError::AlreadyCheckedOut { .. } => {
                (StatusCode::CONFLICT, ErrorCode::BookAlreadyCheckedOut)
            }
            CirculationError::CardInactive { .. } => (StatusCode::CONFLICT, ErrorCode::CardInactive),
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Circulation(#[from] CirculationError),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::Circulation(e) => {
                let (status, code) = e.status_and_code();
                (status, code, e.to_string())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(error: AppError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn circulation_errors_map_to_not_found_and_conflict() {
        assert_eq!(
            status_of(CirculationError::BookNotFound { isbn: "1".into() }.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CirculationError::CardNotFound { card_id: 7 }.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(
                CirculationError::AlreadyCheckedOut {
                    isbn: "1".into(),
                    title: "Dune".into()
                }
                .into()
            ),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(
                CirculationError::CardInactive {
                    card_id: 7,
                    name: "Ada".into(),
                    status: CardStatus::Suspended
                }
                .into()
            ),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn inactive_card_message_names_holder_and_status() {
        let err = CirculationError::CardInactive {
            card_id: 3,
            name: "Grace Hopper".into(),
            status: CardStatus::Suspended,
        };
        assert_eq!(
            err.to_string(),
            "Card for Grace Hopper is not Active (Status: Suspended)"
        );
    }

    #[test]
    fn auth_and_validation_errors_map_to_client_statuses() {
        assert_eq!(
            status_of(AppError::Authentication("x".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Validation("x".into())),
            StatusCode::BAD_REQUEST
        );
    }
}
