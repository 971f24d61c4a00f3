//! Catalog service

use crate::{
    error::{AppError, AppResult},
    models::Book,
    repository::Repository,
};

pub const BOOK_NOT_AVAILABLE: &str = "Book not available.";

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every book in insertion order
    pub async fn list_books(&self) -> Vec<Book> {
        self.repository.books.list().await
    }

    pub async fn count_books(&self) -> usize {
        self.repository.books.len().await
    }

    /// Get a book by ID
    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Add a book as received
    pub async fn create_book(&self, book: Book) -> Book {
        let created = self.repository.books.create(book).await;
        tracing::info!(
            "Catalog create: added book id={:?} ({} books in store)",
            created.id,
            self.count_books().await
        );
        created
    }

    /// Take one copy of a book out of stock
    pub async fn checkout_book(&self, id: &str) -> AppResult<Book> {
        self.repository
            .books
            .update_by_id(id, |book| {
                if !book.is_available() {
                    tracing::debug!("Checkout refused for id={:?}: quantity={}", id, book.quantity);
                    return Err(AppError::BusinessRule(BOOK_NOT_AVAILABLE.to_string()));
                }
                book.quantity -= 1;
                Ok(())
            })
            .await
    }
}
