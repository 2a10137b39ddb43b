//! Computer sessions repository

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::computer_session::ComputerSession};

#[derive(Clone)]
pub struct ComputerSessionsRepository {
    pool: Pool<Postgres>,
}

impl ComputerSessionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM computer_sessions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Most recently recorded session row; carries the current free-computer gauge
    pub async fn latest(&self) -> AppResult<Option<ComputerSession>> {
        let session = sqlx::query_as::<_, ComputerSession>(
            r#"
            SELECT session_id, card_id, num_of_sessions, remaining_computers
            FROM computer_sessions
            ORDER BY session_id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    /// Sessions used by a card (0 when it never used the lab)
    pub async fn sessions_used(&self, card_id: i32) -> AppResult<i32> {
        let used: Option<i32> = sqlx::query_scalar(
            "SELECT num_of_sessions FROM computer_sessions WHERE card_id = $1 ORDER BY session_id DESC LIMIT 1",
        )
        .bind(card_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(used.unwrap_or(0))
    }
}
