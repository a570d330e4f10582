use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::db::Database;

const COLUMNS: &str = "isbn, amazon_url, author, language, pages, publisher, title, year";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema, sqlx::FromRow)]
pub struct Book {
    #[schema(example = "0691161518")]
    pub isbn: String,
    #[schema(example = "http://a.co/eobPtX2")]
    pub amazon_url: String,
    #[schema(example = "Matthew Lane")]
    pub author: String,
    #[schema(example = "English")]
    pub language: String,
    #[schema(example = 264)]
    pub pages: i32,
    #[schema(example = "Princeton")]
    pub publisher: String,
    #[schema(example = "Power-Up")]
    pub title: String,
    #[schema(example = 2017)]
    pub year: i32,
}

/// Payload for creating a book. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewBook {
    #[validate(length(min = 1, max = 13, message = "Must be between 1 and 13 characters long"))]
    #[schema(example = "0691161518")]
    pub isbn: String,
    #[validate(url(message = "Must be a valid URL"))]
    #[schema(example = "http://a.co/eobPtX2")]
    pub amazon_url: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub language: String,
    #[validate(range(min = 1, message = "Must be at least 1"))]
    pub pages: i32,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub publisher: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub title: String,
    #[validate(range(min = 0, max = 9999, message = "Must be between 0 and 9999"))]
    pub year: i32,
}

/// Payload for replacing the mutable fields of a book. The isbn comes from the path.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct BookUpdate {
    #[validate(url(message = "Must be a valid URL"))]
    #[schema(example = "http://a.co/eobPtX2")]
    pub amazon_url: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub language: String,
    #[validate(range(min = 1, message = "Must be at least 1"))]
    pub pages: i32,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub publisher: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub title: String,
    #[validate(range(min = 0, max = 9999, message = "Must be between 0 and 9999"))]
    pub year: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("Book with isbn {isbn} not found")]
    NotFound { isbn: String },
    #[error("Book with isbn {isbn} already exists")]
    AlreadyExists { isbn: String },
    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl Book {
    /// Returns every book, ordered by isbn.
    #[tracing::instrument(skip_all)]
    pub async fn all(db: &Database) -> Result<Vec<Book>, BookError> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {COLUMNS} FROM books ORDER BY isbn"
        ))
        .fetch_all(db.pool())
        .await?;

        tracing::trace!(count = books.len(), "Fetched books");

        Ok(books)
    }

    #[tracing::instrument(skip(db))]
    pub async fn get(db: &Database, isbn: &str) -> Result<Book, BookError> {
        sqlx::query_as::<_, Book>(&format!("SELECT {COLUMNS} FROM books WHERE isbn = ?"))
            .bind(isbn)
            .fetch_optional(db.pool())
            .await?
            .ok_or_else(|| BookError::NotFound {
                isbn: isbn.to_string(),
            })
    }

    /// Inserts a new book and returns the stored row.
    #[tracing::instrument(skip_all, fields(isbn = %book.isbn))]
    pub async fn create(db: &Database, book: NewBook) -> Result<Book, BookError> {
        let created = sqlx::query_as::<_, Book>(&format!(
            "INSERT INTO books ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (isbn) DO NOTHING \
             RETURNING {COLUMNS}"
        ))
        .bind(&book.isbn)
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .fetch_optional(db.pool())
        .await?;

        match created {
            Some(created) => {
                tracing::debug!("Book created");

                Ok(created)
            }
            None => Err(BookError::AlreadyExists { isbn: book.isbn }),
        }
    }

    /// Replaces every field but the isbn and returns the stored row.
    #[tracing::instrument(skip(db, update))]
    pub async fn update(db: &Database, isbn: &str, update: BookUpdate) -> Result<Book, BookError> {
        sqlx::query_as::<_, Book>(&format!(
            "UPDATE books SET amazon_url = ?, author = ?, language = ?, pages = ?, \
             publisher = ?, title = ?, year = ? \
             WHERE isbn = ? \
             RETURNING {COLUMNS}"
        ))
        .bind(&update.amazon_url)
        .bind(&update.author)
        .bind(&update.language)
        .bind(update.pages)
        .bind(&update.publisher)
        .bind(&update.title)
        .bind(update.year)
        .bind(isbn)
        .fetch_optional(db.pool())
        .await?
        .ok_or_else(|| BookError::NotFound {
            isbn: isbn.to_string(),
        })
    }

    #[tracing::instrument(skip(db))]
    pub async fn remove(db: &Database, isbn: &str) -> Result<(), BookError> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = ?")
            .bind(isbn)
            .execute(db.pool())
            .await?;

        match result.rows_affected() {
            0 => Err(BookError::NotFound {
                isbn: isbn.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
