//! Loanable items repository

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::Item};

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Postgres>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT item_id, name, card_id, checkout_date, due_date FROM items ORDER BY item_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
