//! Book endpoints

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult},
    models::Book,
};

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books in insertion order", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> Json<Vec<Book>> {
    Json(state.services.catalog.list_books().await)
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 400, description = "Malformed id", body = crate::error::MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::MessageResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(&id).await?;
    Ok(Json(book))
}

/// Create a new book.
///
/// The body is decoded as a JSON object whatever its content type. Missing or
/// `null` fields take their zero value and ids are not checked for duplicates.
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Body could not be decoded", body = crate::error::DecodeErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = Book::from_request_body(&body)?;
    tracing::debug!("Create book request: {:?}", book);

    let created = state.services.catalog.create_book(book).await;
    Ok((StatusCode::CREATED, Json(created)))
}
