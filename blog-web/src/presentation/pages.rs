use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use thiserror::Error;
use tracing::error;

use crate::domain::error::DomainError;

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    status: u16,
    reason: &'a str,
    message: &'a str,
}

/// Renders `template` as an HTML response with the given status.
pub fn render<T: Template>(status: StatusCode, template: &T) -> Result<HttpResponse, DomainError> {
    let html = template.render()?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(html))
}

/// Error type of the HTML view handlers: same status codes as [`DomainError`]
/// but rendered as an error page instead of JSON.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct PageError(#[from] DomainError);

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        self.0.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match &self.0 {
            DomainError::Internal(_) => "Something went wrong. Please try again later.".to_owned(),
            other => other.to_string(),
        };
        let page = ErrorTemplate {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
            message: &message,
        };
        match render(status, &page) {
            Ok(response) => response,
            Err(err) => {
                error!("failed to render error page: {}", err);
                self.0.error_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn not_found_renders_html_page() {
        let response = PageError::from(DomainError::ArticleNotFound(5)).error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );

        let body = to_bytes(response.into_body()).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("404"));
        assert!(html.contains("article not found: 5"));
    }

    #[actix_web::test]
    async fn internal_details_are_hidden() {
        let response =
            PageError::from(DomainError::Internal("connection refused".into())).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(!html.contains("connection refused"));
    }
}
