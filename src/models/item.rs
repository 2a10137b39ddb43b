//! Loanable non-book items (laptops, projectors, ...)

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Days between checkout and due date for items
pub const ITEM_LOAN_PERIOD_DAYS: i64 = 3;

/// Item from database. Borrowed exactly when `card_id` is set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Item {
    pub item_id: i32,
    pub name: String,
    pub card_id: Option<i32>,
    pub checkout_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

/// Item as listed, with its derived loan state
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemListing {
    #[serde(flatten)]
    pub item: Item,
    pub borrowed: bool,
    pub is_overdue: bool,
    /// Due date expected from the checkout date and the item loan period
    pub expected_due_date: Option<NaiveDate>,
}

impl ItemListing {
    pub fn new(item: Item, today: NaiveDate) -> Self {
        let borrowed = item.card_id.is_some();
        let is_overdue = borrowed && item.due_date.map(|d| d < today).unwrap_or(false);
        let expected_due_date = item
            .checkout_date
            .map(|d| d + Duration::days(ITEM_LOAN_PERIOD_DAYS));
        Self {
            item,
            borrowed,
            is_overdue,
            expected_due_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn borrowed_item_past_due_is_overdue() {
        let item = Item {
            item_id: 1,
            name: "Laptop".into(),
            card_id: Some(9),
            checkout_date: Some(date(2024, 5, 1)),
            due_date: Some(date(2024, 5, 4)),
        };
        let listing = ItemListing::new(item, date(2024, 5, 6));
        assert!(listing.borrowed);
        assert!(listing.is_overdue);
        assert_eq!(listing.expected_due_date, Some(date(2024, 5, 4)));
    }

    #[test]
    fn unborrowed_item_is_never_overdue() {
        let item = Item {
            item_id: 2,
            name: "Projector".into(),
            card_id: None,
            checkout_date: None,
            due_date: None,
        };
        let listing = ItemListing::new(item, date(2024, 5, 6));
        assert!(!listing.borrowed);
        assert!(!listing.is_overdue);
        assert_eq!(listing.expected_due_date, None);
    }
}
