use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("article not found: {0}")]
    ArticleNotFound(i64),
    #[error("user not found: {0}")]
    UserNotFound(i64),
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::ArticleNotFound(_) | DomainError::UserNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            DomainError::InvalidCredentials | DomainError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            DomainError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            DomainError::Internal(detail) => {
                error!("internal error: {}", detail);
                "internal server error".to_owned()
            }
            other => other.to_string(),
        };
        let details = match self {
            DomainError::ArticleNotFound(resource) | DomainError::UserNotFound(resource) => {
                Some(json!({ "resource": resource }))
            }
            DomainError::Unauthenticated => Some(json!({ "login": "/login" })),
            _ => None,
        };
        let body = ErrorBody {
            error: message.as_str(),
            details,
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<askama::Error> for DomainError {
    fn from(err: askama::Error) -> Self {
        DomainError::Internal(format!("template error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    #[rstest]
    #[case(DomainError::ArticleNotFound(7), StatusCode::NOT_FOUND)]
    #[case(DomainError::UserNotFound(7), StatusCode::NOT_FOUND)]
    #[case(DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED)]
    #[case(DomainError::Unauthenticated, StatusCode::UNAUTHORIZED)]
    #[case(DomainError::UserAlreadyExists("a@b.com".into()), StatusCode::CONFLICT)]
    #[case(DomainError::Validation("title".into()), StatusCode::BAD_REQUEST)]
    #[case(DomainError::Internal("db".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_errors_to_status(#[case] err: DomainError, #[case] expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
        assert_eq!(err.error_response().status(), expected);
    }

    #[actix_web::test]
    async fn not_found_body_names_the_resource() {
        let response = DomainError::ArticleNotFound(42).error_response();
        let body = to_bytes(response.into_body()).await.expect("body");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(value["error"], "article not found: 42");
        assert_eq!(value["details"]["resource"], 42);
    }

    #[actix_web::test]
    async fn internal_body_hides_the_store_message() {
        let response =
            DomainError::Internal("database error: connection refused".into()).error_response();
        let body = to_bytes(response.into_body()).await.expect("body");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(value["error"], "internal server error");
        assert!(!String::from_utf8_lossy(&body).contains("connection refused"));
    }
}
