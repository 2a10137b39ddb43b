//! API handlers for the library dashboard REST endpoints

pub mod auth;
pub mod books;
pub mod cards;
pub mod circulation;
pub mod dashboard;
pub mod health;
pub mod items;
pub mod openapi;
pub mod reports;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
    routing::{get, post},
    RequestPartsExt, Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::admin::AdminClaims, AppState};

/// Request-scoped admin authorization, taken from the bearer token.
/// Handlers that need admin rights take this as an argument.
pub struct AdminSession(pub AdminClaims);

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::Authentication("Missing or invalid authorization header".to_string()))?;

        let claims = state.services.auth.verify_token(bearer.token())?;
        Ok(AdminSession(claims))
    }
}

/// `Json` body whose rejections render as [`AppError`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `Query` whose rejections render as [`AppError`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// `Path` whose rejections render as [`AppError`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Admin session
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Dashboard
        .route("/dashboard", get(dashboard::get_dashboard))
        // Catalog
        .route("/books", get(books::search_books))
        .route("/books/:isbn", get(books::get_book))
        .route("/items", get(items::list_items))
        // Members
        .route("/cards", get(cards::search_cards))
        .route("/cards/:id", get(cards::get_card))
        // Circulation
        .route("/circulation/checkout", post(circulation::checkout))
        .route("/circulation/return", post(circulation::return_book))
        // Admin listings
        .route("/admin/books", get(books::list_all_books))
        .route("/admin/cards", get(cards::list_all_cards))
        // Reports
        .route("/reports/top-borrowers", get(reports::top_borrowers))
        .route("/reports/fines", get(reports::fines))
        .route("/reports/active-checkouts", get(reports::active_checkouts))
        .route("/reports/computer-usage", get(reports::computer_usage))
        .route("/reports/overdue", get(reports::overdue))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
