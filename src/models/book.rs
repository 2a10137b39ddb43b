//! Book model and the loan-field invariant

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::{BookCondition, BookStatus};

/// Days between checkout and due date for books
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// Due date of a book checked out on `checkout_date`
pub fn due_date_for(checkout_date: NaiveDate) -> NaiveDate {
    checkout_date + Duration::days(LOAN_PERIOD_DAYS)
}

/// Book model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub condition: BookCondition,
    pub purchase_date: NaiveDate,
    /// Card currently holding the book
    #[sqlx(rename = "lib_card_id")]
    pub borrower_card_id: Option<i32>,
    pub checkout_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    #[sqlx(rename = "checkout_status")]
    pub status: BookStatus,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }

    /// Borrower, checkout date and due date are all unset exactly when the
    /// book is available, and all set exactly when it is checked out.
    pub fn loan_fields_consistent(&self) -> bool {
        let set = [
            self.borrower_card_id.is_some(),
            self.checkout_date.is_some(),
            self.due_date.is_some(),
        ];
        match self.status {
            BookStatus::Available => set.iter().all(|s| !s),
            BookStatus::CheckedOut => set.iter().all(|s| *s),
        }
    }
}

/// Book row as shown in search results
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookSummary {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub condition: BookCondition,
    #[sqlx(rename = "checkout_status")]
    pub status: BookStatus,
}

/// Recently purchased book, for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RecentBook {
    pub title: String,
    pub author: String,
    pub purchase_date: NaiveDate,
}

/// Book currently held by a card
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CurrentCheckout {
    pub isbn: String,
    pub title: String,
    pub due_date: NaiveDate,
}

/// Book search query
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Substring of title, author or ISBN (case-insensitive)
    pub q: Option<String>,
}
