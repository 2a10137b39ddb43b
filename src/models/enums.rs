//! Shared domain enums stored as text columns

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Implements `as_str`, `Display`, `FromStr` and the sqlx text codec for an enum
/// whose database representation is a fixed label.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    _ => Err(format!(concat!("Invalid ", stringify!($name), ": {}"), s)),
                }
            }
        }

        impl sqlx::Type<Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s: &str = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// BookStatus
// ---------------------------------------------------------------------------

/// Circulation state of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum BookStatus {
    Available,
    CheckedOut,
}

text_enum!(BookStatus {
    Available => "Available",
    CheckedOut => "Checked Out",
});

// ---------------------------------------------------------------------------
// BookCondition
// ---------------------------------------------------------------------------

/// Physical condition of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BookCondition {
    New,
    Good,
    Fair,
    Poor,
}

text_enum!(BookCondition {
    New => "New",
    Good => "Good",
    Fair => "Fair",
    Poor => "Poor",
});

// ---------------------------------------------------------------------------
// CardType
// ---------------------------------------------------------------------------

/// Membership category of a library card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum CardType {
    Standard,
    Student,
    Senior,
    Child,
}

text_enum!(CardType {
    Standard => "Standard",
    Student => "Student",
    Senior => "Senior",
    Child => "Child",
});

// ---------------------------------------------------------------------------
// CardStatus
// ---------------------------------------------------------------------------

/// Standing of a library card; only active cards may borrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum CardStatus {
    Active,
    Suspended,
}

text_enum!(CardStatus {
    Active => "Active",
    Suspended => "Suspended",
});

// ---------------------------------------------------------------------------
// FineStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum FineStatus {
    Paid,
    Outstanding,
}

text_enum!(FineStatus {
    Paid => "Paid",
    Outstanding => "Outstanding",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_out_uses_stored_label_with_space() {
        assert_eq!(BookStatus::CheckedOut.as_str(), "Checked Out");
        assert_eq!("Checked Out".parse::<BookStatus>(), Ok(BookStatus::CheckedOut));
        assert!("CheckedOut".parse::<BookStatus>().is_err());
    }

    #[test]
    fn json_uses_variant_names() {
        assert_eq!(
            serde_json::to_string(&BookStatus::CheckedOut).unwrap(),
            "\"CheckedOut\""
        );
        assert_eq!(
            serde_json::from_str::<CardStatus>("\"Suspended\"").unwrap(),
            CardStatus::Suspended
        );
    }

    #[test]
    fn unknown_labels_are_rejected() {
        assert!("Expired".parse::<CardStatus>().is_err());
        assert!("Mint".parse::<BookCondition>().is_err());
        assert_eq!("Child".parse::<CardType>(), Ok(CardType::Child));
        assert_eq!("Outstanding".parse::<FineStatus>(), Ok(FineStatus::Outstanding));
    }
}
