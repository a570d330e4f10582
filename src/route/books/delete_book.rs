use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::ErrorVerbosityProvider, extractor::path::ApiPath, model::book::Book, state::ApiState,
};

use super::{book_error, BookResourceError};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteBookResponse {
    #[schema(example = "Book deleted")]
    pub message: String,
}

impl IntoResponse for DeleteBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Delete a book.
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    responses(
        (status = 200, description = "The book was deleted", body = DeleteBookResponse),
        (status = 404, description = "Book not found"),
    )
)]
#[tracing::instrument(name = "delete_book", skip_all)]
pub async fn delete_book(
    State(state): State<ApiState>,
    ApiPath(isbn): ApiPath<String>,
) -> Result<DeleteBookResponse, BookResourceError> {
    tracing::debug!(%isbn, "Deleting book");

    Book::remove(state.database(), &isbn)
        .await
        .map_err(book_error(state.error_verbosity()))?;

    Ok(DeleteBookResponse {
        message: "Book deleted".to_string(),
    })
}
