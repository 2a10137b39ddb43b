//! Reporting endpoints (admin only)

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::report::{
        ActiveCheckoutsReport, ComputerUsage, FineReportQuery, FinesReport, OverdueReport,
        TopBorrowersReport,
    },
};

use super::{AdminSession, ApiQuery};

/// Members ranked by books currently checked out
#[utoipa::path(
    get,
    path = "/reports/top-borrowers",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Top 15 borrowers with summary", body = TopBorrowersReport),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn top_borrowers(
    State(state): State<crate::AppState>,
    AdminSession(_claims): AdminSession,
) -> AppResult<Json<TopBorrowersReport>> {
    let report = state.services.reports.top_borrowers().await?;
    Ok(Json(report))
}

/// Fines aggregated per member, optionally restricted to one status
#[utoipa::path(
    get,
    path = "/reports/fines",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(FineReportQuery),
    responses(
        (status = 200, description = "Fines per member with totals", body = FinesReport),
        (status = 400, description = "Unknown status filter", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn fines(
    State(state): State<crate::AppState>,
    AdminSession(_claims): AdminSession,
    ApiQuery(query): ApiQuery<FineReportQuery>,
) -> AppResult<Json<FinesReport>> {
    let report = state.services.reports.fines(query.status).await?;
    Ok(Json(report))
}

/// Checked-out books with borrower and due dates
#[utoipa::path(
    get,
    path = "/reports/active-checkouts",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active checkouts, soonest due first", body = ActiveCheckoutsReport),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn active_checkouts(
    State(state): State<crate::AppState>,
    AdminSession(_claims): AdminSession,
) -> AppResult<Json<ActiveCheckoutsReport>> {
    let report = state.services.reports.active_checkouts().await?;
    Ok(Json(report))
}

/// Computer lab usage per card type
#[utoipa::path(
    get,
    path = "/reports/computer-usage",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Usage grouped by card type", body = Vec<ComputerUsage>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn computer_usage(
    State(state): State<crate::AppState>,
    AdminSession(_claims): AdminSession,
) -> AppResult<Json<Vec<ComputerUsage>>> {
    let report = state.services.reports.computer_usage().await?;
    Ok(Json(report))
}

/// Overdue books with days overdue and potential fines
#[utoipa::path(
    get,
    path = "/reports/overdue",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Overdue books, most overdue first", body = OverdueReport),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn overdue(
    State(state): State<crate::AppState>,
    AdminSession(_claims): AdminSession,
) -> AppResult<Json<OverdueReport>> {
    let report = state.services.reports.overdue().await?;
    Ok(Json(report))
}
