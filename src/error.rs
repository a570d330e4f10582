use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use derive_more::From;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ErrorVerbosity {
    /// Server returns the appropriate status code with an empty body and no error headers.
    None,
    /// Server returns the appropriate status code and error headers with an empty body.
    StatusCode,
    /// Server returns only the message with the appropriate status code.
    Message,
    /// Server returns the message, the error type with cleared error content and the appropriate status code.
    Type,
    /// Server returns the message, the error type with the error content and the appropriate status code.
    Full,
}

impl ErrorVerbosity {
    pub fn should_generate_error_reason(&self) -> bool {
        matches!(self, ErrorVerbosity::Full)
    }
}

pub trait ErrorVerbosityProvider {
    fn error_verbosity(&self) -> ErrorVerbosity;
}

/// Maps any error into an [`InternalServerError`] using the verbosity of the given state.
#[macro_export]
macro_rules! server_error {
    ($state:ident) => {
        |err| {
            $crate::error::ApiError::from(
                $crate::error::InternalServerError::from_generic_error(
                    $crate::error::ErrorVerbosityProvider::error_verbosity(&$state),
                    err,
                ),
            )
        }
    };
}

#[derive(Debug, Serialize)]
struct ApiErrorResponse {
    #[serde(flatten)]
    error: ApiError,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ApiErrorMessage {
    message: &'static str,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status_code = self.error.status_code();

        match self.error.verbosity() {
            ErrorVerbosity::None | ErrorVerbosity::StatusCode => status_code.into_response(),
            ErrorVerbosity::Message => (
                status_code,
                Json(ApiErrorMessage {
                    message: self.message,
                }),
            )
                .into_response(),
            ErrorVerbosity::Type | ErrorVerbosity::Full => {
                (status_code, Json(self)).into_response()
            }
        }
    }
}

#[derive(Debug, From, Serialize)]
#[serde(tag = "error_type", content = "error")]
/// API error
pub enum ApiError {
    /// Internal server error
    ///
    /// This error is returned when an internal server error occurs.
    InternalServerError(InternalServerError),
    /// Body error
    ///
    /// This error is returned when the body could not be parsed as the expected JSON.
    Body(BodyError),
    /// Validation error
    ///
    /// This error is returned when an extracted value violates its validation rules.
    Validation(ValidationError),
    /// Path error
    ///
    /// This error is returned when the path is not as expected.
    Path(PathError),
    /// Method not allowed
    ///
    /// This error is returned when the method is not allowed.
    MethodNotAllowed(MethodNotAllowedError),
    /// Not found error
    ///
    /// This error is returned when no route matches the request.
    NotFound(NotFoundError),
}

impl ApiError {
    fn verbosity(&self) -> ErrorVerbosity {
        match self {
            ApiError::InternalServerError(err) => err.verbosity,
            ApiError::Body(err) => err.verbosity,
            ApiError::Validation(err) => err.verbosity,
            ApiError::Path(err) => err.verbosity,
            ApiError::MethodNotAllowed(err) => err.verbosity,
            ApiError::NotFound(err) => err.verbosity,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::InternalServerError(_) => "An internal server error has occurred",
            ApiError::Body(_) => "Failed to parse request body",
            ApiError::Validation(_) => "Validation failed",
            ApiError::Path(_) => "Failed to parse path parameters",
            ApiError::MethodNotAllowed(_) => "Method not allowed",
            ApiError::NotFound(_) => "The requested resource was not found",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Body(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Path(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(error: ApiError) -> Self {
        let message = error.message();

        ApiErrorResponse { error, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiErrorResponse::from(self).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct InternalServerError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    internal_server_error: Option<String>,
}

impl InternalServerError {
    pub fn from_generic_error<E: Into<anyhow::Error>>(verbosity: ErrorVerbosity, err: E) -> Self {
        let err: anyhow::Error = err.into();
        let err = format!("{err:#}");
        tracing::error!(%err, "Internal server error");

        let internal_server_error = verbosity.should_generate_error_reason().then_some(err);

        InternalServerError {
            verbosity,
            internal_server_error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BodyError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    body_error_reason: Option<String>,
    body_expected_schema: Option<String>,
}

impl BodyError {
    /// `expected_schema` is only rendered when the verbosity asks for it.
    pub fn from_json_rejection(
        verbosity: ErrorVerbosity,
        rejection: JsonRejection,
        expected_schema: impl FnOnce() -> Option<String>,
    ) -> Self {
        let (body_error_reason, body_expected_schema) =
            match verbosity.should_generate_error_reason() {
                true => (Some(rejection.body_text()), expected_schema()),
                false => (None, None),
            };

        BodyError {
            verbosity,
            body_error_reason,
            body_expected_schema,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ValidationError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    validation_errors: Option<ValidationErrors>,
}

impl ValidationError {
    pub fn from_validation_errors(verbosity: ErrorVerbosity, errors: ValidationErrors) -> Self {
        let validation_errors = verbosity.should_generate_error_reason().then_some(errors);

        ValidationError {
            verbosity,
            validation_errors,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PathError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    path_error_reason: Option<String>,
}

impl PathError {
    pub fn from_path_rejection(verbosity: ErrorVerbosity, rejection: PathRejection) -> Self {
        let path_error_reason = verbosity
            .should_generate_error_reason()
            .then(|| rejection.body_text());

        PathError {
            verbosity,
            path_error_reason,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MethodNotAllowedError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
}

impl MethodNotAllowedError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        MethodNotAllowedError { verbosity }
    }
}

#[derive(Debug, Serialize)]
pub struct NotFoundError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
}

impl NotFoundError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        NotFoundError { verbosity }
    }
}

/// Errors that belong to a single resource, e.g. a book that does not exist.
pub trait ResourceErrorProvider: Serialize {
    type Context: Serialize;

    fn headers(&self) -> Option<HeaderMap> {
        None
    }

    fn status_code(&self) -> StatusCode;

    fn message(&self) -> &'static str;

    fn context(&self) -> Self::Context;
}

/// Either a resource specific error or a generic [`ApiError`].
#[derive(Debug)]
pub enum ResourceError<T> {
    Resource {
        verbosity: ErrorVerbosity,
        error: T,
    },
    Api(ApiError),
}

impl<T> ResourceError<T> {
    pub fn new(verbosity: ErrorVerbosity, error: T) -> Self {
        ResourceError::Resource { verbosity, error }
    }
}

impl<T> From<ApiError> for ResourceError<T> {
    fn from(error: ApiError) -> Self {
        ResourceError::Api(error)
    }
}

#[derive(Serialize)]
struct ResourceErrorResponse<'a, T, C> {
    #[serde(flatten)]
    error_type: &'a T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<C>,
    message: &'static str,
}

impl<T> IntoResponse for ResourceError<T>
where
    T: ResourceErrorProvider,
{
    fn into_response(self) -> Response {
        let (verbosity, error) = match self {
            ResourceError::Api(error) => return error.into_response(),
            ResourceError::Resource { verbosity, error } => (verbosity, error),
        };

        let status_code = error.status_code();
        let headers = error.headers().unwrap_or_default();
        let message = error.message();

        match verbosity {
            ErrorVerbosity::None => status_code.into_response(),
            ErrorVerbosity::StatusCode => (status_code, headers).into_response(),
            ErrorVerbosity::Message => {
                (status_code, headers, Json(ApiErrorMessage { message })).into_response()
            }
            ErrorVerbosity::Type | ErrorVerbosity::Full => {
                let context = verbosity
                    .should_generate_error_reason()
                    .then(|| error.context());

                let body = ResourceErrorResponse {
                    error_type: &error,
                    error: context,
                    message,
                };

                (status_code, headers, Json(body)).into_response()
            }
        }
    }
}
