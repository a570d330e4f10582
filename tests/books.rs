mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use bookstore_api::error::ErrorVerbosity;
use common::{harry_potter_fields, Fixture};
use serde_json::{json, Value};

#[tokio::test]
async fn get_books_lists_all_books_ordered_by_isbn() {
    let fixture = Fixture::new().await;

    let (status, body) = fixture.send(Method::GET, "/books", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "books": [fixture.harry_potter, fixture.power_up] })
    );

    fixture.teardown().await;
}

#[tokio::test]
async fn post_books_creates_a_book() {
    let fixture = Fixture::new().await;

    let new_book = json!({
        "isbn": "0000000000",
        "amazon_url": "http://a.co/eobtX2",
        "author": "JK Rowling",
        "language": "English",
        "pages": 800,
        "publisher": "Penguin",
        "title": "Harry Potter",
        "year": 2003
    });

    let (status, body) = fixture
        .send(Method::POST, "/books", Some(new_book.clone()))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "book": new_book }));

    let (status, body) = fixture.send(Method::GET, "/books/0000000000", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": new_book }));

    let (_, body) = fixture.send(Method::GET, "/books", None).await;
    assert_eq!(body["books"].as_array().map(Vec::len), Some(3));

    fixture.teardown().await;
}

#[tokio::test]
async fn post_books_with_duplicate_isbn_is_a_conflict() {
    let fixture = Fixture::new().await;

    let mut duplicate = harry_potter_fields();
    duplicate["isbn"] = json!("0691161518");

    let (status, body) = fixture.send(Method::POST, "/books", Some(duplicate)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body,
        json!({
            "error_type": "AlreadyExists",
            "error": { "reason": "Book with isbn 0691161518 already exists" },
            "message": "Book already exists"
        })
    );

    // The stored book is untouched.
    let (_, body) = fixture.send(Method::GET, "/books/0691161518", None).await;
    assert_eq!(body, json!({ "book": fixture.power_up }));

    fixture.teardown().await;
}

#[tokio::test]
async fn post_books_with_missing_field_is_a_bad_request() {
    let fixture = Fixture::new().await;

    let mut incomplete = harry_potter_fields();
    incomplete["isbn"] = json!("1111111111");
    incomplete
        .as_object_mut()
        .expect("Fields are an object")
        .remove("title");

    let (status, body) = fixture.send(Method::POST, "/books", Some(incomplete)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Body");
    assert!(body["error"]["body_error_reason"]
        .as_str()
        .is_some_and(|reason| reason.contains("title")));
    assert!(body["error"]["body_expected_schema"].is_string());

    let (status, _) = fixture.send(Method::GET, "/books/1111111111", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    fixture.teardown().await;
}

#[tokio::test]
async fn post_books_with_wrong_type_is_a_bad_request() {
    let fixture = Fixture::new().await;

    let mut wrong = harry_potter_fields();
    wrong["isbn"] = json!("1111111111");
    wrong["pages"] = json!("eight hundred");

    let (status, body) = fixture.send(Method::POST, "/books", Some(wrong)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Body");

    fixture.teardown().await;
}

#[tokio::test]
async fn post_books_with_invalid_fields_fails_validation() {
    let fixture = Fixture::new().await;

    let mut invalid = harry_potter_fields();
    invalid["isbn"] = json!("1111111111");
    invalid["amazon_url"] = json!("not a url");
    invalid["pages"] = json!(0);

    let (status, body) = fixture.send(Method::POST, "/books", Some(invalid)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Validation");
    assert_eq!(body["message"], "Validation failed");

    let errors = &body["error"]["validation_errors"];
    assert!(errors.get("amazon_url").is_some());
    assert!(errors.get("pages").is_some());
    assert!(errors.get("title").is_none());

    let (status, _) = fixture.send(Method::GET, "/books/1111111111", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    fixture.teardown().await;
}

#[tokio::test]
async fn post_books_without_json_content_type_is_a_bad_request() {
    let fixture = Fixture::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("isbn=1111111111"))
        .expect("Failed to build request");

    let (status, body) = fixture.send_request(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Body");

    fixture.teardown().await;
}

#[tokio::test]
async fn get_book_returns_the_book() {
    let fixture = Fixture::new().await;

    let (status, body) = fixture.send(Method::GET, "/books/0691161518", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": fixture.power_up }));

    fixture.teardown().await;
}

#[tokio::test]
async fn get_book_with_unknown_isbn_is_not_found() {
    let fixture = Fixture::new().await;

    let (status, body) = fixture.send(Method::GET, "/books/0999999999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "error_type": "NotFound",
            "error": { "reason": "Book with isbn 0999999999 not found" },
            "message": "Book not found"
        })
    );

    fixture.teardown().await;
}

#[tokio::test]
async fn put_book_updates_the_book() {
    let fixture = Fixture::new().await;

    let (status, body) = fixture
        .send(Method::PUT, "/books/0691161518", Some(harry_potter_fields()))
        .await;

    let mut expected = harry_potter_fields();
    expected["isbn"] = json!("0691161518");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": expected }));

    let (status, body) = fixture.send(Method::GET, "/books/0691161518", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": expected }));

    fixture.teardown().await;
}

#[tokio::test]
async fn put_book_with_unknown_isbn_is_not_found() {
    let fixture = Fixture::new().await;

    let (status, body) = fixture
        .send(Method::PUT, "/books/99999999999", Some(harry_potter_fields()))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");

    fixture.teardown().await;
}

#[tokio::test]
async fn put_book_cannot_change_the_isbn() {
    let fixture = Fixture::new().await;

    let mut fields = harry_potter_fields();
    fields["isbn"] = json!("1111111111");

    let (status, body) = fixture
        .send(Method::PUT, "/books/0691161518", Some(fields))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Body");

    let (_, body) = fixture.send(Method::GET, "/books/0691161518", None).await;
    assert_eq!(body, json!({ "book": fixture.power_up }));

    fixture.teardown().await;
}

#[tokio::test]
async fn put_book_with_missing_field_is_a_bad_request() {
    let fixture = Fixture::new().await;

    let mut incomplete = harry_potter_fields();
    incomplete
        .as_object_mut()
        .expect("Fields are an object")
        .remove("author");

    let (status, body) = fixture
        .send(Method::PUT, "/books/0691161518", Some(incomplete))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Body");
    assert!(body["error"]["body_error_reason"]
        .as_str()
        .is_some_and(|reason| reason.contains("author")));

    let (_, body) = fixture.send(Method::GET, "/books/0691161518", None).await;
    assert_eq!(body, json!({ "book": fixture.power_up }));

    fixture.teardown().await;
}

#[tokio::test]
async fn put_book_with_invalid_fields_fails_validation() {
    let fixture = Fixture::new().await;

    let mut fields = harry_potter_fields();
    fields["title"] = json!("");

    let (status, body) = fixture
        .send(Method::PUT, "/books/0691161518", Some(fields))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Validation");
    assert!(body["error"]["validation_errors"].get("title").is_some());

    fixture.teardown().await;
}

#[tokio::test]
async fn delete_book_deletes_the_book() {
    let fixture = Fixture::new().await;

    let uri = format!("/books/{}", fixture.power_up.isbn);

    let (status, body) = fixture.send(Method::DELETE, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Book deleted" }));

    let (status, _) = fixture.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = fixture.send(Method::GET, "/books", None).await;
    assert_eq!(body, json!({ "books": [fixture.harry_potter] }));

    fixture.teardown().await;
}

#[tokio::test]
async fn delete_book_with_unknown_isbn_is_not_found() {
    let fixture = Fixture::new().await;

    let (status, body) = fixture.send(Method::DELETE, "/books/0999999999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");

    fixture.teardown().await;
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let fixture = Fixture::new().await;

    let (status, body) = fixture.send(Method::GET, "/authors", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "error_type": "NotFound",
            "error": {},
            "message": "The requested resource was not found"
        })
    );

    fixture.teardown().await;
}

#[tokio::test]
async fn unsupported_method_is_not_allowed() {
    let fixture = Fixture::new().await;

    let (status, body) = fixture.send(Method::PATCH, "/books/0691161518", None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error_type"], "MethodNotAllowed");
    assert_eq!(body["message"], "Method not allowed");

    fixture.teardown().await;
}

#[tokio::test]
async fn message_verbosity_hides_error_details() {
    let fixture = Fixture::with_verbosity(ErrorVerbosity::Message).await;

    let (status, body) = fixture.send(Method::GET, "/books/0999999999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Book not found" }));

    fixture.teardown().await;
}

#[tokio::test]
async fn type_verbosity_omits_error_content() {
    let fixture = Fixture::with_verbosity(ErrorVerbosity::Type).await;

    let (status, body) = fixture.send(Method::GET, "/books/0999999999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "error_type": "NotFound", "message": "Book not found" })
    );

    fixture.teardown().await;
}

#[tokio::test]
async fn status_code_verbosity_has_empty_body() {
    let fixture = Fixture::with_verbosity(ErrorVerbosity::StatusCode).await;

    let (status, body) = fixture
        .send(Method::PUT, "/books/0999999999", Some(harry_potter_fields()))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);

    fixture.teardown().await;
}

#[tokio::test]
async fn none_verbosity_keeps_error_status_with_empty_body() {
    let fixture = Fixture::with_verbosity(ErrorVerbosity::None).await;

    let (status, body) = fixture.send(Method::GET, "/books/0999999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);

    let (status, body) = fixture
        .send(Method::PUT, "/books/99999999999", Some(harry_potter_fields()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);

    let (status, body) = fixture.send(Method::DELETE, "/books/0999999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);

    let mut invalid = harry_potter_fields();
    invalid["isbn"] = json!("1111111111");
    invalid["amazon_url"] = json!("not a url");

    let (status, body) = fixture.send(Method::POST, "/books", Some(invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, Value::Null);

    let (status, body) = fixture
        .send(Method::POST, "/books", Some(json!({ "isbn": "1111111111" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, Value::Null);

    fixture.teardown().await;
}

#[tokio::test]
async fn openapi_document_lists_book_paths() {
    let fixture = Fixture::new().await;

    let (status, body) = fixture
        .send(Method::GET, "/api-docs/openapi.json", None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/books").is_some());
    assert!(body["paths"].get("/books/{isbn}").is_some());
    assert!(body["components"]["schemas"].get("Book").is_some());

    fixture.teardown().await;
}
