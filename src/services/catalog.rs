//! Catalog service: book search and loanable items

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Book, BookSummary, ItemListing},
    repository::Repository,
    services::circulation::Clock,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl CatalogService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Search books by title, author or ISBN; a blank term lists the first books
    pub async fn search_books(&self, term: Option<&str>) -> AppResult<Vec<BookSummary>> {
        match term.map(str::trim).filter(|t| !t.is_empty()) {
            Some(term) => self.repository.books.search(term).await,
            None => self.repository.books.list_default().await,
        }
    }

    /// Get book by ISBN
    pub async fn get_book(&self, isbn: &str) -> AppResult<Book> {
        self.repository.books.get_by_isbn(isbn.trim()).await
    }

    /// Every book, ordered by title
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_all().await
    }

    /// Loanable items with their derived loan state
    pub async fn list_items(&self) -> AppResult<Vec<ItemListing>> {
        let today = self.clock.today();
        let items = self.repository.items.list().await?;
        Ok(items
            .into_iter()
            .map(|item| ItemListing::new(item, today))
            .collect())
    }
}
