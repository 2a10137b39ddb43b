//! Transactional store for checkout/return

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::AppResult,
    models::{Book, BookStatus, LibraryCard},
    services::circulation::CirculationStore,
};

#[derive(Clone)]
pub struct CirculationRepository {
    pool: Pool<Postgres>,
}

impl CirculationRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Open a transaction for one checkout or return
    pub async fn begin(&self) -> AppResult<CirculationTx> {
        Ok(CirculationTx {
            tx: self.pool.begin().await?,
        })
    }
}

/// One open transaction. The book row read through it stays locked until
/// [`CirculationTx::commit`]; dropping it rolls back.
pub struct CirculationTx {
    tx: Transaction<'static, Postgres>,
}

impl CirculationTx {
    pub async fn commit(self) -> AppResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl CirculationStore for CirculationTx {
    async fn find_book_by_isbn(&mut self, isbn: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE isbn = $1 FOR UPDATE")
            .bind(isbn)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(book)
    }

    async fn find_card_by_id(&mut self, card_id: i32) -> AppResult<Option<LibraryCard>> {
        let card = sqlx::query_as::<_, LibraryCard>(
            "SELECT card_id, name, dob, card_type, status FROM library_cards WHERE card_id = $1",
        )
        .bind(card_id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(card)
    }

    async fn update_book_checkout_fields(
        &mut self,
        isbn: &str,
        card_id: i32,
        checkout_date: NaiveDate,
        due_date: NaiveDate,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE books
            SET lib_card_id = $1, checkout_date = $2, due_date = $3, checkout_status = $4
            WHERE isbn = $5
            "#,
        )
        .bind(card_id)
        .bind(checkout_date)
        .bind(due_date)
        .bind(BookStatus::CheckedOut)
        .bind(isbn)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn clear_book_checkout_fields(&mut self, isbn: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE books
            SET lib_card_id = NULL, checkout_date = NULL, due_date = NULL, checkout_status = $1
            WHERE isbn = $2
            "#,
        )
        .bind(BookStatus::Available)
        .bind(isbn)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }
}
