//! Loanable item endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, models::ItemListing};

/// List loanable items with borrower and overdue state
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses(
        (status = 200, description = "All items", body = Vec<ItemListing>)
    )
)]
pub async fn list_items(State(state): State<crate::AppState>) -> AppResult<Json<Vec<ItemListing>>> {
    let items = state.services.catalog.list_items().await?;
    Ok(Json(items))
}
