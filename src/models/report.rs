//! Report rows and their summaries

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::{
    book::RecentBook,
    enums::{CardType, FineStatus},
};

/// Rows returned by the top borrowers report
pub const TOP_BORROWERS_LIMIT: i64 = 15;

/// Potential fine charged per overdue day ($0.50)
pub const OVERDUE_FINE_PER_DAY: Decimal = Decimal::from_parts(50, 0, 0, false, 2);

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardMetrics {
    pub total_books: i64,
    pub active_members: i64,
    pub books_checked_out: i64,
    pub computer_sessions: i64,
    /// Latest reported free computers; `None` when no session was recorded
    pub computers_available: Option<i32>,
    pub recent_books: Vec<RecentBook>,
}

// ---------------------------------------------------------------------------
// Top borrowers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TopBorrower {
    pub card_id: i32,
    pub name: String,
    pub card_type: CardType,
    pub num_books_checked_out: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TopBorrowersReport {
    pub borrowers: Vec<TopBorrower>,
    pub total_active_borrowers: i64,
    pub max_books_out: i64,
    pub avg_books_per_borrower: f64,
}

impl TopBorrowersReport {
    pub fn new(borrowers: Vec<TopBorrower>) -> Self {
        let total = borrowers.len() as i64;
        let max_books_out = borrowers
            .iter()
            .map(|b| b.num_books_checked_out)
            .max()
            .unwrap_or(0);
        let sum: i64 = borrowers.iter().map(|b| b.num_books_checked_out).sum();
        let avg_books_per_borrower = if total == 0 {
            0.0
        } else {
            sum as f64 / total as f64
        };
        Self {
            borrowers,
            total_active_borrowers: total,
            max_books_out,
            avg_books_per_borrower,
        }
    }
}

// ---------------------------------------------------------------------------
// Fines by member
// ---------------------------------------------------------------------------

/// Named fine-status filter; always bound as a query parameter
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FineStatusFilter {
    #[default]
    All,
    Outstanding,
    Paid,
}

impl FineStatusFilter {
    pub fn status(self) -> Option<FineStatus> {
        match self {
            FineStatusFilter::All => None,
            FineStatusFilter::Outstanding => Some(FineStatus::Outstanding),
            FineStatusFilter::Paid => Some(FineStatus::Paid),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct FineReportQuery {
    /// all (default), outstanding or paid
    #[serde(default)]
    pub status: FineStatusFilter,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MemberFines {
    pub card_id: i32,
    pub name: String,
    pub card_type: CardType,
    #[schema(value_type = String)]
    pub total_fines: Decimal,
    pub num_fines: i64,
    /// Only reported when no status filter is applied
    #[schema(value_type = Option<String>)]
    pub outstanding_amount: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FinesReport {
    pub status: FineStatusFilter,
    pub members: Vec<MemberFines>,
    #[schema(value_type = String)]
    pub total_fines: Decimal,
    #[schema(value_type = Option<String>)]
    pub total_outstanding: Option<Decimal>,
    pub members_with_fines: i64,
}

impl FinesReport {
    pub fn new(status: FineStatusFilter, members: Vec<MemberFines>) -> Self {
        let total_fines = members.iter().map(|m| m.total_fines).sum();
        let total_outstanding = match status {
            FineStatusFilter::All => Some(
                members
                    .iter()
                    .filter_map(|m| m.outstanding_amount)
                    .sum(),
            ),
            _ => None,
        };
        Self {
            status,
            members_with_fines: members.len() as i64,
            members,
            total_fines,
            total_outstanding,
        }
    }
}

// ---------------------------------------------------------------------------
// Active checkouts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ActiveCheckout {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub borrower: String,
    pub card_id: i32,
    pub checkout_date: NaiveDate,
    pub due_date: NaiveDate,
    /// today - due_date; negative while the book is not yet due
    pub days_until_due: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActiveCheckoutsReport {
    pub checkouts: Vec<ActiveCheckout>,
    pub total_checked_out: i64,
}

// ---------------------------------------------------------------------------
// Computer usage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ComputerUsage {
    pub card_type: CardType,
    pub total_active_sessions: i64,
    pub avg_sessions_per_member: f64,
    pub total_sessions_all_time: i64,
}

// ---------------------------------------------------------------------------
// Overdue books
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct OverdueBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub card_id: i32,
    pub borrower: String,
    pub card_type: CardType,
    pub checkout_date: NaiveDate,
    pub due_date: NaiveDate,
    pub days_overdue: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OverdueReport {
    pub books: Vec<OverdueBook>,
    pub total_days_overdue: i64,
    #[schema(value_type = String)]
    pub potential_fines: Decimal,
}

impl OverdueReport {
    pub fn new(books: Vec<OverdueBook>) -> Self {
        let total_days_overdue: i64 = books.iter().map(|b| b.days_overdue as i64).sum();
        let potential_fines = Decimal::from(total_days_overdue) * OVERDUE_FINE_PER_DAY;
        Self {
            books,
            total_days_overdue,
            potential_fines,
        }
    }
}
