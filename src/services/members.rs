//! Member (library card) lookup service

use crate::{
    error::AppResult,
    models::{card::MemberSearch, CardDetails, LibraryCard},
    repository::Repository,
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Look up cards by id (digits) or name substring. Blank terms and
    /// out-of-range ids return nothing without querying.
    pub async fn search(&self, term: &str) -> AppResult<Vec<LibraryCard>> {
        match MemberSearch::parse(term) {
            Some(search) => self.repository.cards.search(&search).await,
            None => Ok(Vec::new()),
        }
    }

    /// Card with lab usage, current checkouts, fines and identification
    pub async fn get_details(&self, card_id: i32) -> AppResult<CardDetails> {
        let card = self.repository.cards.get_by_id(card_id).await?;
        let computer_sessions_used = self.repository.computer_sessions.sessions_used(card_id).await?;
        let current_checkouts = self.repository.books.current_checkouts(card_id).await?;
        let fines = self.repository.fines.for_card(card_id).await?;
        let identification = self.repository.cards.identification(card_id).await?;

        Ok(CardDetails {
            card,
            computer_sessions_used,
            current_checkouts,
            fines,
            identification,
        })
    }

    /// Every card, ordered by id
    pub async fn list_all(&self) -> AppResult<Vec<LibraryCard>> {
        self.repository.cards.list_all().await
    }
}
