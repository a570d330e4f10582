use axum::extract::State;

use crate::{
    error::ErrorVerbosityProvider, extractor::path::ApiPath, model::book::Book, state::ApiState,
};

use super::{book_error, BookResourceError, BookResponse};

/// Get a book by its isbn.
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    responses(
        (status = 200, description = "The book", body = BookResponse),
        (status = 404, description = "Book not found"),
    )
)]
#[tracing::instrument(name = "get_book", skip_all)]
pub async fn get_book(
    State(state): State<ApiState>,
    ApiPath(isbn): ApiPath<String>,
) -> Result<BookResponse, BookResourceError> {
    tracing::debug!(%isbn, "Getting book");

    let book = Book::get(state.database(), &isbn)
        .await
        .map_err(book_error(state.error_verbosity()))?;

    Ok(BookResponse { book })
}
