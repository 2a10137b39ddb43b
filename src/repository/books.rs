//! Books repository for database operations

use sqlx::{Pool, Postgres};

use super::like_pattern;
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{CurrentCheckout, RecentBook},
        Book, BookStatus, BookSummary,
    },
};

/// Rows listed when no search term is given
const DEFAULT_LISTING_LIMIT: i64 = 50;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ISBN
    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE isbn = $1")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", isbn)))
    }

    /// Search title, author or ISBN for a substring
    pub async fn search(&self, term: &str) -> AppResult<Vec<BookSummary>> {
        let pattern = like_pattern(term);
        let books = sqlx::query_as::<_, BookSummary>(
            r#"
            SELECT isbn, title, author, condition, checkout_status
            FROM books
            WHERE title ILIKE $1 OR author ILIKE $1 OR isbn ILIKE $1
            ORDER BY title
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// First books in catalog order, shown before any search
    pub async fn list_default(&self) -> AppResult<Vec<BookSummary>> {
        let books = sqlx::query_as::<_, BookSummary>(
            "SELECT isbn, title, author, condition, checkout_status FROM books ORDER BY isbn LIMIT $1",
        )
        .bind(DEFAULT_LISTING_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// All books ordered by title
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY title")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Most recently purchased books
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<RecentBook>> {
        let books = sqlx::query_as::<_, RecentBook>(
            "SELECT title, author, purchase_date FROM books ORDER BY purchase_date DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Books currently held by a card
    pub async fn current_checkouts(&self, card_id: i32) -> AppResult<Vec<CurrentCheckout>> {
        let books = sqlx::query_as::<_, CurrentCheckout>(
            r#"
            SELECT isbn, title, due_date
            FROM books
            WHERE lib_card_id = $1 AND checkout_status = $2
            ORDER BY due_date
            "#,
        )
        .bind(card_id)
        .bind(BookStatus::CheckedOut)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_checked_out(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE checkout_status = $1")
            .bind(BookStatus::CheckedOut)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
