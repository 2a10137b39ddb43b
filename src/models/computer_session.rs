//! Computer lab session counters

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Per-card session counter. `remaining_computers` is a lab-wide gauge:
/// the value on the most recent row is the current one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ComputerSession {
    pub session_id: i32,
    pub card_id: i32,
    pub num_of_sessions: i32,
    pub remaining_computers: i32,
}
