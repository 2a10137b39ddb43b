//! Reports and dashboard metrics

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::report::{
        ActiveCheckoutsReport, ComputerUsage, DashboardMetrics, FineStatusFilter, FinesReport,
        OverdueReport, TopBorrowersReport, TOP_BORROWERS_LIMIT,
    },
    repository::Repository,
    services::circulation::Clock,
};

/// Books listed under "recently added" on the dashboard
const RECENT_BOOKS: i64 = 5;

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl ReportsService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Key counters for the dashboard
    pub async fn dashboard(&self) -> AppResult<DashboardMetrics> {
        let total_books = self.repository.books.count().await?;
        let active_members = self.repository.cards.count_active().await?;
        let books_checked_out = self.repository.books.count_checked_out().await?;
        let computer_sessions = self.repository.computer_sessions.count().await?;
        let computers_available = self
            .repository
            .computer_sessions
            .latest()
            .await?
            .map(|s| s.remaining_computers);
        let recent_books = self.repository.books.recent(RECENT_BOOKS).await?;

        Ok(DashboardMetrics {
            total_books,
            active_members,
            books_checked_out,
            computer_sessions,
            computers_available,
            recent_books,
        })
    }

    pub async fn top_borrowers(&self) -> AppResult<TopBorrowersReport> {
        let rows = self.repository.reports.top_borrowers(TOP_BORROWERS_LIMIT).await?;
        Ok(TopBorrowersReport::new(rows))
    }

    pub async fn fines(&self, filter: FineStatusFilter) -> AppResult<FinesReport> {
        let rows = self.repository.reports.fines_by_member(filter).await?;
        Ok(FinesReport::new(filter, rows))
    }

    pub async fn active_checkouts(&self) -> AppResult<ActiveCheckoutsReport> {
        let checkouts = self
            .repository
            .reports
            .active_checkouts(self.clock.today())
            .await?;
        Ok(ActiveCheckoutsReport {
            total_checked_out: checkouts.len() as i64,
            checkouts,
        })
    }

    pub async fn computer_usage(&self) -> AppResult<Vec<ComputerUsage>> {
        self.repository.reports.computer_usage().await
    }

    pub async fn overdue(&self) -> AppResult<OverdueReport> {
        let books = self.repository.reports.overdue_books(self.clock.today()).await?;
        Ok(OverdueReport::new(books))
    }
}
