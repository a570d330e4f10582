use axum::extract::State;

use crate::{
    error::ErrorVerbosityProvider,
    extractor::{json::ApiJson, path::ApiPath, validated::Validated},
    model::book::{Book, BookUpdate},
    state::ApiState,
};

use super::{book_error, BookResourceError, BookResponse};

/// Replace every field of a book except its isbn.
#[utoipa::path(
    put,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    request_body = BookUpdate,
    responses(
        (status = 200, description = "The updated book", body = BookResponse),
        (status = 400, description = "Malformed or invalid body"),
        (status = 404, description = "Book not found"),
    )
)]
#[tracing::instrument(name = "update_book", skip_all)]
pub async fn update_book(
    State(state): State<ApiState>,
    ApiPath(isbn): ApiPath<String>,
    Validated(ApiJson(update)): Validated<ApiJson<BookUpdate>>,
) -> Result<BookResponse, BookResourceError> {
    tracing::debug!(%isbn, "Updating book");

    let book = Book::update(state.database(), &isbn, update)
        .await
        .map_err(book_error(state.error_verbosity()))?;

    Ok(BookResponse { book })
}
