//! Checkout endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::Book,
};

pub const MISSING_ID: &str = "Missing id query parameter";

#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CheckoutParams {
    /// ID of the book to check out; only the first occurrence is used
    pub id: Option<String>,
}

impl CheckoutParams {
    /// Pick the parameters out of the decoded query pairs
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let id = pairs
            .into_iter()
            .find(|(key, _)| key == "id")
            .map(|(_, value)| value);
        Self { id }
    }
}

/// Check out one copy of a book
#[utoipa::path(
    patch,
    path = "/checkout",
    tag = "books",
    params(CheckoutParams),
    responses(
        (status = 200, description = "Book checked out, quantity decremented", body = Book),
        (status = 400, description = "Missing id or book not available", body = crate::error::MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::MessageResponse)
    )
)]
pub async fn checkout_book(
    State(state): State<crate::AppState>,
    WithRejection(Query(pairs), _): WithRejection<Query<Vec<(String, String)>>, AppError>,
) -> AppResult<Json<Book>> {
    let params = CheckoutParams::from_pairs(pairs);
    tracing::debug!("Checkout requested: id={:?}", params.id);

    let id = params
        .id
        .ok_or_else(|| AppError::BadRequest(MISSING_ID.to_string()))?;

    let book = state.services.catalog.checkout_book(&id).await?;
    Ok(Json(book))
}
