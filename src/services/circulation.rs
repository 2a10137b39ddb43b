//! Checkout/return state machine
//!
//! A book is either `Available` or `CheckedOut`. Each transition runs as one
//! read-check-write unit against a [`CirculationStore`]; in production the
//! store is a database transaction holding a row lock on the book, which is
//! the only guard against two concurrent checkouts of the same ISBN.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppResult, CirculationError},
    models::{book::due_date_for, Book, LibraryCard},
    repository::Repository,
};

/// Reads and writes needed by checkout and return.
///
/// "Not found" is reported as `Ok(None)`; `Err` is reserved for store failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CirculationStore: Send {
    async fn find_book_by_isbn(&mut self, isbn: &str) -> AppResult<Option<Book>>;

    async fn find_card_by_id(&mut self, card_id: i32) -> AppResult<Option<LibraryCard>>;

    async fn update_book_checkout_fields(
        &mut self,
        isbn: &str,
        card_id: i32,
        checkout_date: NaiveDate,
        due_date: NaiveDate,
    ) -> AppResult<()>;

    async fn clear_book_checkout_fields(&mut self, isbn: &str) -> AppResult<()>;
}

/// Source of the current date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the server
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Confirmation of a successful checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CheckoutReceipt {
    pub isbn: String,
    pub title: String,
    pub card_id: i32,
    pub borrower_name: String,
    pub checkout_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// Result of a return. Returning an available book is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReturnOutcome {
    Returned { isbn: String, title: String },
    AlreadyAvailable { isbn: String, title: String },
}

impl ReturnOutcome {
    pub fn title(&self) -> &str {
        match self {
            ReturnOutcome::Returned { title, .. } | ReturnOutcome::AlreadyAvailable { title, .. } => {
                title
            }
        }
    }
}

/// Assign `isbn` to `card_id` for the loan period starting `today`.
///
/// Checks run in order and the first failure wins: book exists, book is
/// available, card exists, card is active. Nothing is written on failure.
pub async fn check_out<S>(
    store: &mut S,
    isbn: &str,
    card_id: i32,
    today: NaiveDate,
) -> AppResult<CheckoutReceipt>
where
    S: CirculationStore + ?Sized,
{
    let book = store
        .find_book_by_isbn(isbn)
        .await?
        .ok_or_else(|| CirculationError::BookNotFound {
            isbn: isbn.to_string(),
        })?;

    if !book.is_available() {
        return Err(CirculationError::AlreadyCheckedOut {
            isbn: book.isbn,
            title: book.title,
        }
        .into());
    }

    let card = store
        .find_card_by_id(card_id)
        .await?
        .ok_or(CirculationError::CardNotFound { card_id })?;

    if !card.is_active() {
        return Err(CirculationError::CardInactive {
            card_id,
            name: card.name,
            status: card.status,
        }
        .into());
    }

    let due_date = due_date_for(today);
    store
        .update_book_checkout_fields(&book.isbn, card_id, today, due_date)
        .await?;

    Ok(CheckoutReceipt {
        isbn: book.isbn,
        title: book.title,
        card_id,
        borrower_name: card.name,
        checkout_date: today,
        due_date,
    })
}

/// Make `isbn` available again. Idempotent for books already available.
pub async fn return_book<S>(store: &mut S, isbn: &str) -> AppResult<ReturnOutcome>
where
    S: CirculationStore + ?Sized,
{
    let book = store
        .find_book_by_isbn(isbn)
        .await?
        .ok_or_else(|| CirculationError::BookNotFound {
            isbn: isbn.to_string(),
        })?;

    if book.is_available() {
        return Ok(ReturnOutcome::AlreadyAvailable {
            isbn: book.isbn,
            title: book.title,
        });
    }

    store.clear_book_checkout_fields(&book.isbn).await?;

    Ok(ReturnOutcome::Returned {
        isbn: book.isbn,
        title: book.title,
    })
}

/// Runs transitions inside a database transaction
#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl CirculationService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Check a book out to a card
    pub async fn checkout(&self, isbn: &str, card_id: i32) -> AppResult<CheckoutReceipt> {
        let isbn = isbn.trim();
        let mut tx = self.repository.circulation.begin().await?;

        let receipt = match check_out(&mut tx, isbn, card_id, self.clock.today()).await {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::debug!(isbn, card_id, error = %e, "Checkout rejected");
                return Err(e);
            }
        };
        tx.commit().await?;

        tracing::info!(
            isbn,
            card_id,
            due_date = %receipt.due_date,
            "Book checked out"
        );
        Ok(receipt)
    }

    /// Return a book
    pub async fn return_book(&self, isbn: &str) -> AppResult<ReturnOutcome> {
        let isbn = isbn.trim();
        let mut tx = self.repository.circulation.begin().await?;

        let outcome = match return_book(&mut tx, isbn).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(isbn, error = %e, "Return rejected");
                return Err(e);
            }
        };
        tx.commit().await?;

        match &outcome {
            ReturnOutcome::Returned { .. } => tracing::info!(isbn, "Book returned"),
            ReturnOutcome::AlreadyAvailable { .. } => {
                tracing::info!(isbn, "Return of an available book ignored")
            }
        }
        Ok(outcome)
    }
}
