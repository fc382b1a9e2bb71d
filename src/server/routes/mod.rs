mod categories;
mod questions;
mod quizzes;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::telemetry::API_ERRORS;
use crate::trivia::{self, ErrorKind};

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

/// A failed request. Only the kind reaches the client; details are logged.
#[derive(Debug)]
pub struct ApiError(ErrorKind);

impl From<ErrorKind> for ApiError {
    fn from(kind: ErrorKind) -> Self {
        ApiError(kind)
    }
}

impl From<trivia::Error> for ApiError {
    fn from(error: trivia::Error) -> Self {
        let kind = error.kind();
        match kind {
            ErrorKind::Internal | ErrorKind::Unprocessable => {
                tracing::error!(error = ?error, "{error}")
            }
            _ => tracing::info!("Rejected request: {error}"),
        }
        ApiError(kind)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        trivia::Error::Malformed(rejection.body_text()).into()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        trivia::Error::Malformed(rejection.body_text()).into()
    }
}

// a path that does not parse, like /api/questions/abc, names no resource
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::info!("Unroutable path: {}", rejection.body_text());
        ApiError(ErrorKind::NotFound)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        API_ERRORS.with_label_values(&[code.to_string().as_str()]).inc();
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorBody {
            success: false,
            error: code,
            message: self.0.message(),
        };
        (status, Json(body)).into_response()
    }
}

/// A successful payload, serialized with `"success": true` next to its own fields.
pub struct Envelope<T>(pub T);

#[derive(Serialize)]
struct Success<'a, T> {
    success: bool,
    #[serde(flatten)]
    body: &'a T,
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(Success {
            success: true,
            body: &self.0,
        })
        .into_response()
    }
}

pub type ApiResponse<T> = Result<Envelope<T>, ApiError>;

/// `axum::Json` with rejections reported in the error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

pub async fn not_found() -> ApiError {
    ApiError(ErrorKind::NotFound)
}

pub async fn method_not_allowed() -> ApiError {
    ApiError(ErrorKind::MethodNotAllowed)
}
