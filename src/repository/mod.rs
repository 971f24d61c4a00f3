//! Repository layer for in-memory storage

pub mod books;

/// Main repository struct holding the stores
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a repository loaded with the startup records
    pub fn new() -> Self {
        Self {
            books: books::BooksRepository::seeded(),
        }
    }
}
