use axum::{extract::State, http::StatusCode};

use crate::{
    error::ErrorVerbosityProvider,
    extractor::{json::ApiJson, validated::Validated},
    model::book::{Book, NewBook},
    state::ApiState,
};

use super::{book_error, BookResourceError, BookResponse};

/// Create a book. The caller supplies the isbn.
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = NewBook,
    responses(
        (status = 201, description = "The created book", body = BookResponse),
        (status = 400, description = "Malformed or invalid body"),
        (status = 409, description = "A book with this isbn already exists"),
    )
)]
#[tracing::instrument(name = "create_book", skip_all)]
pub async fn create_book(
    State(state): State<ApiState>,
    Validated(ApiJson(new_book)): Validated<ApiJson<NewBook>>,
) -> Result<(StatusCode, BookResponse), BookResourceError> {
    tracing::debug!(isbn = %new_book.isbn, "Creating book");

    let book = Book::create(state.database(), new_book)
        .await
        .map_err(book_error(state.error_verbosity()))?;

    Ok((StatusCode::CREATED, BookResponse { book }))
}
