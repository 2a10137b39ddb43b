//! Library cards repository

use sqlx::{Pool, Postgres};

use super::like_pattern;
use crate::{
    error::{AppError, AppResult},
    models::{
        card::{Identification, MemberSearch},
        CardStatus, LibraryCard,
    },
};

#[derive(Clone)]
pub struct CardsRepository {
    pool: Pool<Postgres>,
}

impl CardsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get card by ID
    pub async fn get_by_id(&self, card_id: i32) -> AppResult<LibraryCard> {
        sqlx::query_as::<_, LibraryCard>(
            "SELECT card_id, name, dob, card_type, status FROM library_cards WHERE card_id = $1",
        )
        .bind(card_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Library card {} not found", card_id)))
    }

    /// Cards matching an id or a name substring
    pub async fn search(&self, search: &MemberSearch) -> AppResult<Vec<LibraryCard>> {
        let cards = match search {
            MemberSearch::ById(card_id) => {
                sqlx::query_as::<_, LibraryCard>(
                    "SELECT card_id, name, dob, card_type, status FROM library_cards WHERE card_id = $1",
                )
                .bind(card_id)
                .fetch_all(&self.pool)
                .await?
            }
            MemberSearch::ByName(name) => {
                sqlx::query_as::<_, LibraryCard>(
                    r#"
                    SELECT card_id, name, dob, card_type, status
                    FROM library_cards
                    WHERE name ILIKE $1
                    ORDER BY name
                    "#,
                )
                .bind(like_pattern(name))
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(cards)
    }

    /// All cards ordered by id
    pub async fn list_all(&self) -> AppResult<Vec<LibraryCard>> {
        let cards = sqlx::query_as::<_, LibraryCard>(
            "SELECT card_id, name, dob, card_type, status FROM library_cards ORDER BY card_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(cards)
    }

    /// Identification record linked to a card, if any
    pub async fn identification(&self, card_id: i32) -> AppResult<Option<Identification>> {
        let identification = sqlx::query_as::<_, Identification>(
            r#"
            SELECT outside_id_pk, is_adult, is_valid, is_local
            FROM identifications
            WHERE card_id = $1
            LIMIT 1
            "#,
        )
        .bind(card_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(identification)
    }

    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM library_cards WHERE status = $1")
            .bind(CardStatus::Active)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
