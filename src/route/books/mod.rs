use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{ApiError, ErrorVerbosity, InternalServerError, ResourceError, ResourceErrorProvider},
    model::book::{Book, BookError},
};

pub mod app;
pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod update_book;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub book: Book,
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "error_type")]
pub enum BookErrorType {
    NotFound {
        #[serde(skip)]
        isbn: String,
    },
    AlreadyExists {
        #[serde(skip)]
        isbn: String,
    },
}

#[derive(Debug, Serialize)]
pub struct BookErrorContext {
    pub reason: String,
}

impl ResourceErrorProvider for BookErrorType {
    type Context = BookErrorContext;

    fn status_code(&self) -> StatusCode {
        match self {
            BookErrorType::NotFound { .. } => StatusCode::NOT_FOUND,
            BookErrorType::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            BookErrorType::NotFound { .. } => "Book not found",
            BookErrorType::AlreadyExists { .. } => "Book already exists",
        }
    }

    fn context(&self) -> Self::Context {
        match self {
            BookErrorType::NotFound { isbn } => BookErrorContext {
                reason: format!("Book with isbn {isbn} not found"),
            },
            BookErrorType::AlreadyExists { isbn } => BookErrorContext {
                reason: format!("Book with isbn {isbn} already exists"),
            },
        }
    }
}

pub type BookResourceError = ResourceError<BookErrorType>;

/// Maps a model error to its response. Storage failures become internal server errors.
pub fn book_error(verbosity: ErrorVerbosity) -> impl FnOnce(BookError) -> BookResourceError {
    move |err| match err {
        BookError::NotFound { isbn } => {
            ResourceError::new(verbosity, BookErrorType::NotFound { isbn })
        }
        BookError::AlreadyExists { isbn } => {
            ResourceError::new(verbosity, BookErrorType::AlreadyExists { isbn })
        }
        BookError::Database(err) => {
            ApiError::from(InternalServerError::from_generic_error(verbosity, err)).into()
        }
    }
}
