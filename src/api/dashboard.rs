//! Dashboard endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, models::report::DashboardMetrics};

/// Key library counters and recently purchased books
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard metrics", body = DashboardMetrics)
    )
)]
pub async fn get_dashboard(State(state): State<crate::AppState>) -> AppResult<Json<DashboardMetrics>> {
    let metrics = state.services.reports.dashboard().await?;
    Ok(Json(metrics))
}
