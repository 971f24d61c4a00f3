//! Data models for the book API

pub mod book;

pub use book::{seed_books, Book};
