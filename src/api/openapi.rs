//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, cards, circulation, dashboard, health, items, reports};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Dashboard API",
        version = "1.0.0",
        description = "Circulation desk, member lookup and reporting for a small library"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Dashboard
        dashboard::get_dashboard,
        // Books
        books::search_books,
        books::get_book,
        books::list_all_books,
        // Items
        items::list_items,
        // Cards
        cards::search_cards,
        cards::get_card,
        cards::list_all_cards,
        // Circulation
        circulation::checkout,
        circulation::return_book,
        // Reports
        reports::top_borrowers,
        reports::fines,
        reports::active_checkouts,
        reports::computer_usage,
        reports::overdue,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::SessionInfo,
            // Books
            crate::models::book::Book,
            crate::models::book::BookSummary,
            crate::models::book::RecentBook,
            crate::models::book::CurrentCheckout,
            crate::models::enums::BookStatus,
            crate::models::enums::BookCondition,
            // Items
            crate::models::item::Item,
            crate::models::item::ItemListing,
            // Cards
            crate::models::card::LibraryCard,
            crate::models::card::Identification,
            crate::models::card::CardDetails,
            crate::models::enums::CardType,
            crate::models::enums::CardStatus,
            crate::models::fine::Fine,
            crate::models::enums::FineStatus,
            // Circulation
            circulation::CheckoutRequest,
            circulation::CheckoutResponse,
            circulation::ReturnRequest,
            circulation::ReturnResponse,
            crate::services::circulation::CheckoutReceipt,
            crate::services::circulation::ReturnOutcome,
            // Reports
            crate::models::report::DashboardMetrics,
            crate::models::report::TopBorrower,
            crate::models::report::TopBorrowersReport,
            crate::models::report::FineStatusFilter,
            crate::models::report::MemberFines,
            crate::models::report::FinesReport,
            crate::models::report::ActiveCheckout,
            crate::models::report::ActiveCheckoutsReport,
            crate::models::report::ComputerUsage,
            crate::models::report::OverdueBook,
            crate::models::report::OverdueReport,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Administrator authentication"),
        (name = "dashboard", description = "Library overview"),
        (name = "books", description = "Book catalog"),
        (name = "items", description = "Loanable equipment"),
        (name = "cards", description = "Member lookup"),
        (name = "circulation", description = "Checkout and return"),
        (name = "admin", description = "Full listings for administrators"),
        (name = "reports", description = "Administrative reports")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
