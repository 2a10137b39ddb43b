//! Member lookup endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{card::CardQuery, CardDetails, LibraryCard},
};

use super::{AdminSession, ApiPath, ApiQuery};

/// Look up members by card id or name
#[utoipa::path(
    get,
    path = "/cards",
    tag = "cards",
    params(CardQuery),
    responses(
        (status = 200, description = "Matching cards; empty for a blank term", body = Vec<LibraryCard>)
    )
)]
pub async fn search_cards(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<CardQuery>,
) -> AppResult<Json<Vec<LibraryCard>>> {
    let cards = state
        .services
        .members
        .search(query.q.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(cards))
}

/// Member detail: lab usage, current checkouts, fines
#[utoipa::path(
    get,
    path = "/cards/{id}",
    tag = "cards",
    params(
        ("id" = i32, Path, description = "Card ID")
    ),
    responses(
        (status = 200, description = "Card details", body = CardDetails),
        (status = 400, description = "Card ID is not a number", body = crate::error::ErrorResponse),
        (status = 404, description = "Card not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_card(
    State(state): State<crate::AppState>,
    ApiPath(card_id): ApiPath<i32>,
) -> AppResult<Json<CardDetails>> {
    let details = state.services.members.get_details(card_id).await?;
    Ok(Json(details))
}

/// List every card (admin only)
#[utoipa::path(
    get,
    path = "/admin/cards",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All cards ordered by id", body = Vec<LibraryCard>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_all_cards(
    State(state): State<crate::AppState>,
    AdminSession(_claims): AdminSession,
) -> AppResult<Json<Vec<LibraryCard>>> {
    let cards = state.services.members.list_all().await?;
    Ok(Json(cards))
}
