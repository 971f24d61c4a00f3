//! In-memory book store.
//!
//! The sequence is shared between request handlers through a cloneable handle.
//! Readers share the lock; `create` and `update_by_id` hold it exclusively, so
//! a read-modify-write performed in `update_by_id` cannot interleave with
//! another writer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{seed_books, Book},
};

pub const BOOK_NOT_FOUND: &str = "book not found";

#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BooksRepository {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the startup records
    pub fn seeded() -> Self {
        Self::with_books(seed_books())
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(RwLock::new(books)),
        }
    }

    /// All books in insertion order
    pub async fn list(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    /// First book whose id matches exactly
    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        let books = self.books.read().await;
        position(&books, id)
            .map(|i| books[i].clone())
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }

    /// Append a book; ids are not checked for uniqueness
    pub async fn create(&self, book: Book) -> Book {
        let mut books = self.books.write().await;
        books.push(book.clone());
        book
    }

    /// Mutate the first book matching `id` in place.
    ///
    /// `update` runs under the write lock. If it returns an error the record is
    /// left as it was and the error is passed through.
    pub async fn update_by_id<F>(&self, id: &str, update: F) -> AppResult<Book>
    where
        F: FnOnce(&mut Book) -> AppResult<()>,
    {
        let mut books = self.books.write().await;
        let index =
            position(&books, id).ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;

        let mut updated = books[index].clone();
        update(&mut updated)?;
        books[index] = updated.clone();
        Ok(updated)
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

fn position(books: &[Book], id: &str) -> Option<usize> {
    books.iter().position(|b| b.id == id)
}
