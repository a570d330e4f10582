use axum::Router;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::book::{Book, BookUpdate, NewBook},
    route::books::{
        create_book,
        delete_book::{self, DeleteBookResponse},
        get_book,
        list_books::{self, ListBooksResponse},
        update_book, BookResponse,
    },
    state::ApiState,
};

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Bookstore API", description = "ISBN keyed books CRUD"),
    paths(
        list_books::list_books,
        create_book::create_book,
        get_book::get_book,
        update_book::update_book,
        delete_book::delete_book,
    ),
    components(schemas(
        Book,
        NewBook,
        BookUpdate,
        BookResponse,
        ListBooksResponse,
        DeleteBookResponse,
    )),
    tags((name = "books", description = "Books management"))
)]
pub struct ApiDoc;

/// Serves the OpenAPI document and the Swagger UI, Redoc and RapiDoc viewers.
pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new()
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new(OPENAPI_JSON_PATH).path("/rapidoc"))
}
