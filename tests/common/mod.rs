#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use bookstore_api::{
    db::Database,
    error::ErrorVerbosity,
    model::book::{Book, NewBook},
    server::app,
    state::ApiState,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

pub fn power_up() -> NewBook {
    NewBook {
        isbn: "0691161518".to_string(),
        amazon_url: "http://a.co/eobPtX2".to_string(),
        author: "Matthew Lane".to_string(),
        language: "English".to_string(),
        pages: 264,
        publisher: "Princeton".to_string(),
        title: "Power-Up".to_string(),
        year: 2017,
    }
}

pub fn harry_potter() -> NewBook {
    NewBook {
        isbn: "0000161518".to_string(),
        amazon_url: "http://a.co/eobGtX2".to_string(),
        author: "JK Rowling".to_string(),
        language: "English".to_string(),
        pages: 800,
        publisher: "Penguin".to_string(),
        title: "Harry Potter".to_string(),
        year: 2003,
    }
}

/// Mutable fields of a Harry Potter edition, as sent by clients on update.
pub fn harry_potter_fields() -> Value {
    json!({
        "amazon_url": "http://a.co/eobtX2",
        "author": "JK Rowling",
        "language": "English",
        "pages": 800,
        "publisher": "Penguin",
        "title": "Harry Potter",
        "year": 2003
    })
}

/// A fresh database seeded with two books and the app serving it.
pub struct Fixture {
    pub app: Router,
    pub db: Database,
    pub power_up: Book,
    pub harry_potter: Book,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_verbosity(ErrorVerbosity::Full).await
    }

    pub async fn with_verbosity(verbosity: ErrorVerbosity) -> Self {
        let db = Database::in_memory()
            .await
            .expect("Failed to open in-memory database");

        let power_up = Book::create(&db, power_up())
            .await
            .expect("Failed to seed Power-Up");
        let harry_potter = Book::create(&db, harry_potter())
            .await
            .expect("Failed to seed Harry Potter");

        let app = app(ApiState::new(verbosity, db.clone()));

        Self {
            app,
            db,
            power_up,
            harry_potter,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body = match bytes.is_empty() {
            true => Value::Null,
            false => serde_json::from_slice(&bytes).expect("Body is not JSON"),
        };

        (status, body)
    }

    /// Removes every row and closes the pool.
    pub async fn teardown(self) {
        self.db
            .execute("DELETE FROM books")
            .await
            .expect("Failed to clear books");

        self.db.close().await;
    }
}
