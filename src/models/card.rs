//! Library card (member) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::{
    book::CurrentCheckout,
    enums::{CardStatus, CardType},
    fine::Fine,
};

/// Library card from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LibraryCard {
    pub card_id: i32,
    pub name: String,
    pub dob: Option<NaiveDate>,
    pub card_type: CardType,
    pub status: CardStatus,
}

impl LibraryCard {
    pub fn is_active(&self) -> bool {
        self.status == CardStatus::Active
    }
}

/// External identification document linked to a card
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Identification {
    #[sqlx(rename = "outside_id_pk")]
    pub outside_id: String,
    pub is_adult: bool,
    pub is_valid: bool,
    pub is_local: bool,
}

/// Card with everything the member lookup shows
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CardDetails {
    #[serde(flatten)]
    pub card: LibraryCard,
    pub computer_sessions_used: i32,
    pub current_checkouts: Vec<CurrentCheckout>,
    pub fines: Vec<Fine>,
    pub identification: Option<Identification>,
}

/// Member lookup query
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct CardQuery {
    /// Card id (all digits) or a name substring
    pub q: Option<String>,
}

/// How a member lookup term is interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSearch {
    ById(i32),
    ByName(String),
}

impl MemberSearch {
    /// Digits-only terms look up a card id, anything else searches names.
    /// Returns `None` when the term cannot match any card: blank, or
    /// digits too large for a card id.
    pub fn parse(term: &str) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        if term.chars().all(|c| c.is_ascii_digit()) {
            return term.parse::<i32>().ok().map(MemberSearch::ById);
        }
        Some(MemberSearch::ByName(term.to_string()))
    }
}
