//! Fines repository

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::Fine};

#[derive(Clone)]
pub struct FinesRepository {
    pool: Pool<Postgres>,
}

impl FinesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Fines attached to a card
    pub async fn for_card(&self, card_id: i32) -> AppResult<Vec<Fine>> {
        let fines = sqlx::query_as::<_, Fine>(
            r#"
            SELECT fine_id, card_id, item_id, isbn, amount, status
            FROM fines
            WHERE card_id = $1
            ORDER BY fine_id
            "#,
        )
        .bind(card_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(fines)
    }
}
