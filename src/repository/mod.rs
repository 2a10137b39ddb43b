//! Repository layer for database operations

pub mod books;
pub mod cards;
pub mod circulation;
pub mod computer_sessions;
pub mod fines;
pub mod items;
pub mod reports;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub cards: cards::CardsRepository,
    pub circulation: circulation::CirculationRepository,
    pub computer_sessions: computer_sessions::ComputerSessionsRepository,
    pub fines: fines::FinesRepository,
    pub items: items::ItemsRepository,
    pub reports: reports::ReportsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            cards: cards::CardsRepository::new(pool.clone()),
            circulation: circulation::CirculationRepository::new(pool.clone()),
            computer_sessions: computer_sessions::ComputerSessionsRepository::new(pool.clone()),
            fines: fines::FinesRepository::new(pool.clone()),
            items: items::ItemsRepository::new(pool.clone()),
            reports: reports::ReportsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// `%term%` for ILIKE, with the pattern metacharacters in `term` escaped
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
