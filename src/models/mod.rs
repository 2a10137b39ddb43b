//! Data models for the library dashboard

pub mod admin;
pub mod book;
pub mod card;
pub mod computer_session;
pub mod enums;
pub mod fine;
pub mod item;
pub mod report;

// Re-export commonly used types
pub use book::{Book, BookSummary, LOAN_PERIOD_DAYS};
pub use card::{CardDetails, LibraryCard};
pub use enums::{BookCondition, BookStatus, CardStatus, CardType, FineStatus};
pub use fine::Fine;
pub use item::{Item, ItemListing};
