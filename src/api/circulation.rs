//! Checkout and return endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    error::{AppError, AppResult},
    services::circulation::{CheckoutReceipt, ReturnOutcome},
};

use super::ApiJson;

/// Checkout request, as typed into the checkout form
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckoutRequest {
    /// Book ISBN
    #[validate(custom(function = "not_blank", message = "Book ISBN is required"))]
    pub isbn: String,
    /// Library card ID
    #[validate(custom(function = "not_blank", message = "Library card ID is required"))]
    pub card_id: String,
}

impl CheckoutRequest {
    fn parsed_card_id(&self) -> AppResult<i32> {
        self.card_id
            .trim()
            .parse()
            .map_err(|_| AppError::Validation(format!("Invalid library card ID: {}", self.card_id)))
    }
}

/// Return request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReturnRequest {
    /// Book ISBN
    #[validate(custom(function = "not_blank", message = "Book ISBN is required"))]
    pub isbn: String,
}

/// Successful checkout
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    /// Always "checked_out"
    pub outcome: String,
    pub message: String,
    #[serde(flatten)]
    pub receipt: CheckoutReceipt,
}

/// Return result; `already_available` is informational, not an error
#[derive(Debug, Serialize, ToSchema)]
pub struct ReturnResponse {
    #[serde(flatten)]
    pub result: ReturnOutcome,
    pub message: String,
}

/// Check a book out to a library card
#[utoipa::path(
    post,
    path = "/circulation/checkout",
    tag = "circulation",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Book checked out", body = CheckoutResponse),
        (status = 400, description = "Missing or malformed input", body = crate::error::ErrorResponse),
        (status = 404, description = "Book or card not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book already checked out or card not active", body = crate::error::ErrorResponse)
    )
)]
pub async fn checkout(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    request.validate()?;
    let card_id = request.parsed_card_id()?;

    let receipt = state
        .services
        .circulation
        .checkout(&request.isbn, card_id)
        .await?;

    Ok(Json(CheckoutResponse {
        outcome: "checked_out".to_string(),
        message: format!(
            "Successfully checked out '{}' to {}!",
            receipt.title, receipt.borrower_name
        ),
        receipt,
    }))
}

/// Return a book
#[utoipa::path(
    post,
    path = "/circulation/return",
    tag = "circulation",
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Book returned, or already available", body = ReturnResponse),
        (status = 400, description = "Missing ISBN", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<ReturnRequest>,
) -> AppResult<Json<ReturnResponse>> {
    request.validate()?;

    let result = state.services.circulation.return_book(&request.isbn).await?;
    let message = match &result {
        ReturnOutcome::Returned { title, .. } => format!("Successfully returned '{}'!", title),
        ReturnOutcome::AlreadyAvailable { title, .. } => {
            format!("'{}' is already marked as Available.", title)
        }
    };

    Ok(Json(ReturnResponse { result, message }))
}

/// Form fields holding only whitespace count as missing
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkout_request(isbn: &str, card_id: &str) -> CheckoutRequest {
        CheckoutRequest {
            isbn: isbn.into(),
            card_id: card_id.into(),
        }
    }

    #[test]
    fn blank_fields_fail_validation() {
        assert!(checkout_request("", "42").validate().is_err());
        assert!(checkout_request("978-0-13-468599-1", "  ").validate().is_err());
        assert!(ReturnRequest { isbn: " ".into() }.validate().is_err());
        assert!(checkout_request("978-0-13-468599-1", "42").validate().is_ok());
    }

    #[test]
    fn card_id_must_be_numeric() {
        assert_eq!(checkout_request("x", " 42 ").parsed_card_id().unwrap(), 42);
        assert!(matches!(
            checkout_request("x", "forty-two").parsed_card_id(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn return_response_flattens_outcome() {
        let response = ReturnResponse {
            result: ReturnOutcome::Returned {
                isbn: "978-0-13-468599-1".into(),
                title: "Dune".into(),
            },
            message: "Successfully returned 'Dune'!".into(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["outcome"], "returned");
        assert_eq!(json["isbn"], "978-0-13-468599-1");
        assert_eq!(json["message"], "Successfully returned 'Dune'!");
    }
}
