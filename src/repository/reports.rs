//! Read-only aggregate queries behind the reports view.
//!
//! Every query text is fixed; filters only ever select between texts and
//! travel as bound parameters.

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        report::{
            ActiveCheckout, ComputerUsage, FineStatusFilter, MemberFines, OverdueBook,
            TopBorrower,
        },
        BookStatus, FineStatus,
    },
};

#[derive(Clone)]
pub struct ReportsRepository {
    pool: Pool<Postgres>,
}

impl ReportsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Members ranked by number of books currently checked out
    pub async fn top_borrowers(&self, limit: i64) -> AppResult<Vec<TopBorrower>> {
        let rows = sqlx::query_as::<_, TopBorrower>(
            r#"
            SELECT lc.card_id, lc.name, lc.card_type, COUNT(b.isbn) AS num_books_checked_out
            FROM library_cards lc
            JOIN books b ON lc.card_id = b.lib_card_id
            WHERE b.checkout_status = $1
            GROUP BY lc.card_id, lc.name, lc.card_type
            ORDER BY num_books_checked_out DESC, lc.card_id
            LIMIT $2
            "#,
        )
        .bind(BookStatus::CheckedOut)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Fines aggregated per member
    pub async fn fines_by_member(&self, filter: FineStatusFilter) -> AppResult<Vec<MemberFines>> {
        let rows = match filter.status() {
            None => {
                sqlx::query_as::<_, MemberFines>(
                    r#"
                    SELECT lc.card_id, lc.name, lc.card_type,
                           SUM(f.amount) AS total_fines,
                           COUNT(f.fine_id) AS num_fines,
                           SUM(CASE WHEN f.status = $1 THEN f.amount ELSE 0 END) AS outstanding_amount
                    FROM library_cards lc
                    JOIN fines f ON lc.card_id = f.card_id
                    GROUP BY lc.card_id, lc.name, lc.card_type
                    ORDER BY total_fines DESC, lc.card_id
                    "#,
                )
                .bind(FineStatus::Outstanding)
                .fetch_all(&self.pool)
                .await?
            }
            Some(status) => {
                sqlx::query_as::<_, MemberFines>(
                    r#"
                    SELECT lc.card_id, lc.name, lc.card_type,
                           SUM(f.amount) AS total_fines,
                           COUNT(f.fine_id) AS num_fines,
                           NULL::numeric AS outstanding_amount
                    FROM library_cards lc
                    JOIN fines f ON lc.card_id = f.card_id
                    WHERE f.status = $1
                    GROUP BY lc.card_id, lc.name, lc.card_type
                    HAVING SUM(f.amount) > 0
                    ORDER BY total_fines DESC, lc.card_id
                    "#,
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// Checked-out books with borrower, soonest due first
    pub async fn active_checkouts(&self, today: NaiveDate) -> AppResult<Vec<ActiveCheckout>> {
        let rows = sqlx::query_as::<_, ActiveCheckout>(
            r#"
            SELECT b.isbn, b.title, b.author, lc.name AS borrower,
                   lc.card_id, b.checkout_date, b.due_date,
                   $2::date - b.due_date AS days_until_due
            FROM books b
            JOIN library_cards lc ON b.lib_card_id = lc.card_id
            WHERE b.checkout_status = $1
            ORDER BY b.due_date ASC, b.isbn
            "#,
        )
        .bind(BookStatus::CheckedOut)
        .bind(today)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Computer lab usage per card type
    pub async fn computer_usage(&self) -> AppResult<Vec<ComputerUsage>> {
        let rows = sqlx::query_as::<_, ComputerUsage>(
            r#"
            SELECT lc.card_type,
                   COUNT(cs.session_id) AS total_active_sessions,
                   AVG(cs.num_of_sessions)::float8 AS avg_sessions_per_member,
                   SUM(cs.num_of_sessions)::bigint AS total_sessions_all_time
            FROM library_cards lc
            JOIN computer_sessions cs ON lc.card_id = cs.card_id
            GROUP BY lc.card_type
            ORDER BY total_active_sessions DESC, lc.card_type
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Checked-out books past their due date as of `today`, most overdue first
    pub async fn overdue_books(&self, today: NaiveDate) -> AppResult<Vec<OverdueBook>> {
        let rows = sqlx::query_as::<_, OverdueBook>(
            r#"
            SELECT b.isbn, b.title, b.author, lc.card_id, lc.name AS borrower,
                   lc.card_type, b.checkout_date, b.due_date,
                   $2::date - b.due_date AS days_overdue
            FROM books b
            JOIN library_cards lc ON b.lib_card_id = lc.card_id
            WHERE b.checkout_status = $1
              AND b.due_date < $2::date
            ORDER BY days_overdue DESC, b.isbn
            "#,
        )
        .bind(BookStatus::CheckedOut)
        .bind(today)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
