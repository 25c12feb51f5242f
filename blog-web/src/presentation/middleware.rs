use std::future::{Ready, ready};
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Instant;

use actix_service::{Service, Transform};
use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage, ResponseError, web};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::application::auth_service::AuthService;
use crate::domain::error::DomainError;
use crate::presentation::pages::PageError;
use crate::presentation::session::SessionContext;
use crate::presentation::utils::{AuthenticatedUser, redirect};

static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");
static TIMING_HEADER: HeaderName = HeaderName::from_static("server-timing");

/// Routes reachable without a session.
const PUBLIC_PATHS: &[&str] = &["/login", "/signup", "/user", "/health"];
const PUBLIC_PREFIXES: &[&str] = &["/static/"];

pub const LOGIN_PATH: &str = "/login";

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path) || PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p))
}

pub fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

#[derive(Clone)]
pub struct RequestId(pub String);

pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdService { service }))
    }
}

pub struct RequestIdService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = req
            .headers()
            .get(&REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_owned())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        req.extensions_mut().insert(RequestId(request_id.clone()));

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            if let Ok(value) = HeaderValue::from_str(&request_id) {
                res.response_mut()
                    .headers_mut()
                    .insert(REQUEST_ID_HEADER.clone(), value);
            }
            Ok(res)
        })
    }
}

/// Lets a request through only when it targets a public route or carries a
/// session that resolves to an existing user.
///
/// Rejected HTML requests are redirected to the login page, rejected `/api`
/// requests get a JSON `401`.
pub struct SessionGuard;

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardService {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionGuardService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        if is_public_path(req.path()) {
            let fut = service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let auth_service = req.app_data::<web::Data<AuthService>>().cloned();
        let user_id = SessionContext::new(req.get_session()).user_id();

        Box::pin(async move {
            let auth_service = auth_service
                .ok_or_else(|| actix_web::error::ErrorInternalServerError("AuthService missing"))?;

            // A vanished user means a stale session; any other failure is the store's.
            let user = match user_id {
                Some(id) => match auth_service.get_user(id).await {
                    Ok(user) => Some(user),
                    Err(DomainError::UserNotFound(_)) => None,
                    Err(err) => {
                        error!(path = %req.path(), "failed to resolve session user: {}", err);
                        let response = if is_api_path(req.path()) {
                            err.error_response()
                        } else {
                            PageError::from(err).error_response()
                        };
                        return Ok(req.into_response(response).map_into_right_body());
                    }
                },
                None => None,
            };

            let Some(user) = user else {
                debug!(path = %req.path(), "rejecting anonymous request");
                let response = if is_api_path(req.path()) {
                    DomainError::Unauthenticated.error_response()
                } else {
                    redirect(LOGIN_PATH)
                };
                return Ok(req.into_response(response).map_into_right_body());
            };

            req.extensions_mut().insert(AuthenticatedUser {
                id: user.id(),
                email: user.email().to_owned(),
            });
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

pub struct TimingMiddleware;

impl<S, B> Transform<S, ServiceRequest> for TimingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TimingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimingService { service }))
    }
}

pub struct TimingService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TimingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_owned();
        let rid = req
            .extensions()
            .get::<RequestId>()
            .map(|r| r.0.clone())
            .unwrap_or_else(|| "unknown".into());

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            let duration = start.elapsed();
            let status = res.status().as_u16();
            info!(
                request_id = %rid,
                method = %method,
                path = %path,
                status,
                duration_ms = duration.as_millis() as u64,
                "request completed"
            );

            if let Ok(value) = HeaderValue::from_str(&format!("app;dur={}", duration.as_millis())) {
                res.response_mut()
                    .headers_mut()
                    .insert(TIMING_HEADER.clone(), value);
            }

            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/login", true)]
    #[case("/signup", true)]
    #[case("/user", true)]
    #[case("/health", true)]
    #[case("/static/js/article.js", true)]
    #[case("/articles", false)]
    #[case("/new-article", false)]
    #[case("/api/articles", false)]
    #[case("/logout", false)]
    #[case("/loginx", false)]
    #[case("/static", false)]
    fn allow_list(#[case] path: &str, #[case] public: bool) {
        assert_eq!(is_public_path(path), public);
    }

    #[rstest]
    #[case("/api", true)]
    #[case("/api/articles/1", true)]
    #[case("/apiary", false)]
    #[case("/articles", false)]
    fn api_paths(#[case] path: &str, #[case] api: bool) {
        assert_eq!(is_api_path(path), api);
    }
}
