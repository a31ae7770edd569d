//! Error handling - RFC 7807 compliant responses.

use actix_web::error::{InternalError, JsonPayloadError, PathError};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use blog_core::DomainError;
use blog_core::error::RepoError;
use blog_shared::ErrorResponse;
use std::fmt;

use crate::observability::RequestId;

/// What went wrong, independent of which request it happened in.
#[derive(Debug)]
pub enum ErrorKind {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
    Validation(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotFound(msg) => write!(f, "Not found: {}", msg),
            ErrorKind::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ErrorKind::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ErrorKind::Internal(msg) => write!(f, "Internal error: {}", msg),
            ErrorKind::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

/// Application-level error type that converts to RFC 7807 responses.
///
/// Handlers tag it with the [`RequestId`] so the problem body can be
/// correlated with the `X-Request-ID` response header.
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    request_id: Option<String>,
}

impl AppError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            request_id: None,
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest(detail.into()))
    }

    pub fn with_request_id(mut self, request_id: &RequestId) -> Self {
        self.request_id = Some(request_id.as_str().to_string());
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
            ErrorKind::BadRequest(_) => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict(_) => StatusCode::CONFLICT,
            ErrorKind::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut error = match &self.kind {
            ErrorKind::NotFound(detail) => ErrorResponse::not_found(detail),
            ErrorKind::BadRequest(detail) => ErrorResponse::bad_request(detail),
            ErrorKind::Conflict(detail) => ErrorResponse::new(409, "Conflict").with_detail(detail),
            ErrorKind::Internal(detail) => {
                tracing::error!(request_id = ?self.request_id, "Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            ErrorKind::Validation(detail) => ErrorResponse::unprocessable(detail),
        };
        if let Some(request_id) = &self.request_id {
            error = error.with_request_id(request_id);
        }

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => Self::new(ErrorKind::NotFound(format!(
                "{} with id {} not found",
                entity_type, id
            ))),
            DomainError::Validation(msg) => Self::new(ErrorKind::Validation(msg)),
            DomainError::Repository(err) => err.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        let kind = match err {
            RepoError::NotFound => ErrorKind::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => ErrorKind::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                ErrorKind::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                ErrorKind::Internal("Database error".to_string())
            }
        };
        Self::new(kind)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Turn an extractor failure into a 400 problem body.
fn bad_request(detail: String, req: &HttpRequest) -> HttpResponse {
    let mut error = AppError::bad_request(detail);
    if let Some(request_id) = req.extensions().get::<RequestId>() {
        error = error.with_request_id(request_id);
    }
    error.error_response()
}

/// Error handler for `web::JsonConfig`: malformed or incomplete bodies.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected JSON body");
    let response = bad_request(err.to_string(), req);
    InternalError::from_response(err, response).into()
}

/// Error handler for `web::PathConfig`: non-numeric ids and the like.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected path parameters");
    let response = bad_request(err.to_string(), req);
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_not_found_is_404() {
        let err: AppError = DomainError::NotFound {
            entity_type: "Post",
            id: 9,
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Not found: Post with id 9 not found");
    }

    #[test]
    fn request_id_is_kept_on_the_error() {
        let err = AppError::from(DomainError::NotFound {
            entity_type: "Post",
            id: 9,
        })
        .with_request_id(&RequestId("req-9".to_string()));

        assert_eq!(err.request_id.as_deref(), Some("req-9"));
        assert!(matches!(err.kind, ErrorKind::NotFound(_)));
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_request_is_400() {
        let err = AppError::bad_request("missing field `content`");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Bad request: missing field `content`");
    }

    #[test]
    fn storage_failures_are_500() {
        let err: AppError = DomainError::Repository(RepoError::Query("boom".into())).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: AppError = RepoError::Connection("down".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_is_422() {
        let err: AppError = DomainError::Validation("title too long".into()).into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
