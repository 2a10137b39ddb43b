//! Fine model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::FineStatus;

/// Fine record. At most one of `isbn` / `item_id` is set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Fine {
    pub fine_id: i32,
    pub card_id: i32,
    pub item_id: Option<i32>,
    pub isbn: Option<String>,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub status: FineStatus,
}
