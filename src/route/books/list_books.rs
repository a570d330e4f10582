use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::ErrorVerbosityProvider, model::book::Book, state::ApiState};

use super::{book_error, BookResourceError};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListBooksResponse {
    pub books: Vec<Book>,
}

impl IntoResponse for ListBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// List all books, ordered by isbn.
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = ListBooksResponse),
        (status = 500, description = "Storage failure"),
    )
)]
#[tracing::instrument(name = "list_books", skip_all)]
pub async fn list_books(
    State(state): State<ApiState>,
) -> Result<ListBooksResponse, BookResourceError> {
    let books = Book::all(state.database())
        .await
        .map_err(book_error(state.error_verbosity()))?;

    Ok(ListBooksResponse { books })
}
