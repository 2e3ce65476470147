//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{
    HttpRequest, HttpResponse, ResponseError, error::JsonPayloadError, http::StatusCode, web,
};
use planner_core::{DomainError, ErrorKind};
use planner_shared::ErrorResponse;
use std::fmt;
use validator::ValidationErrors;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
    Validation(Vec<String>),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            AppError::Validation(errors) => ErrorResponse::validation_failed(errors.join(", ")),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err.kind() {
            ErrorKind::Domain => AppError::BadRequest(err.to_string()),
            // Logged by error_response, never shown to the caller
            ErrorKind::Dependency => AppError::Internal(err.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        messages.sort();

        AppError::Validation(messages)
    }
}

/// JSON extractor config turning malformed bodies into problem details.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use planner_core::error::RepoError;
    use planner_core::ports::MailError;

    #[test]
    fn test_domain_errors_are_client_errors_with_message() {
        let err: AppError = DomainError::InvalidStartDate.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid trip start date"));

        let err: AppError = DomainError::InvalidEndDate.into();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid trip end date"));
    }

    #[test]
    fn test_dependency_errors_map_to_internal() {
        let err: AppError = DomainError::Repository(RepoError::Query("syntax".into())).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: AppError = DomainError::Mail(MailError::Send("550".into())).into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[actix_web::test]
    async fn test_internal_details_are_not_exposed() {
        let err: AppError =
            DomainError::Repository(RepoError::Connection("password=hunter2".into())).into();

        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let problem: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(problem.title, "Internal Server Error");
        assert!(problem.detail.is_none());
        assert!(!String::from_utf8_lossy(&body).contains("hunter2"));
    }
}
