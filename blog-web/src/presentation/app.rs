//! Application state and the actix `App` shared by the server binary and the
//! HTTP tests.

use std::sync::Arc;

use actix_cors::Cors;
use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::body::MessageBody;
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpRequest, HttpResponse, Responder, get, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::application::article_service::ArticleService;
use crate::application::auth_service::AuthService;
use crate::data::article_repository::{InMemoryArticleRepository, PostgresArticleRepository};
use crate::data::user_repository::{InMemoryUserRepository, PostgresUserRepository};
use crate::domain::error::DomainError;
use crate::presentation::handlers;
use crate::presentation::middleware::{
    RequestIdMiddleware, SessionGuard, TimingMiddleware, is_api_path,
};
use crate::presentation::pages::PageError;

pub const SESSION_COOKIE: &str = "session";
const SESSION_TTL_HOURS: i64 = 2;

#[derive(Clone)]
pub struct AppState {
    pub articles: ArticleService,
    pub auth: AuthService,
}

impl AppState {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            articles: ArticleService::new(Arc::new(PostgresArticleRepository::new(pool.clone()))),
            auth: AuthService::new(Arc::new(PostgresUserRepository::new(pool))),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            articles: ArticleService::new(Arc::new(InMemoryArticleRepository::new())),
            auth: AuthService::new(Arc::new(InMemoryUserRepository::new())),
        }
    }
}

/// Per-process HTTP settings, cloned into every worker.
#[derive(Clone)]
pub struct HttpSettings {
    pub session_key: Key,
    pub cookie_secure: bool,
    pub cors_origins: Vec<String>,
}

fn session_middleware(settings: &HttpSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.session_key.clone())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default().session_ttl(CookieDuration::hours(SESSION_TTL_HOURS)),
        )
        .build()
}

fn build_cors(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

/// Rejected request bodies, paths and queries answer like any other
/// validation failure: JSON under `/api`, an error page elsewhere.
fn extractor_error(message: String, req: &HttpRequest) -> actix_web::Error {
    let err = DomainError::Validation(message);
    if is_api_path(req.path()) {
        err.into()
    } else {
        PageError::from(err).into()
    }
}

/// Builds the application: middleware stack, shared services and routes.
///
/// Middleware runs outermost first: CORS, access log, request id, timing,
/// hardening headers, session cookie, then the session guard.
pub fn build_app(
    state: AppState,
    settings: HttpSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state.articles))
        .app_data(web::Data::new(state.auth))
        .app_data(
            web::JsonConfig::default()
                .error_handler(|err, req| extractor_error(err.to_string(), req)),
        )
        .app_data(
            web::PathConfig::default()
                .error_handler(|err, req| extractor_error(err.to_string(), req)),
        )
        .app_data(
            web::QueryConfig::default()
                .error_handler(|err, req| extractor_error(err.to_string(), req)),
        )
        .app_data(
            web::FormConfig::default()
                .error_handler(|err, req| extractor_error(err.to_string(), req)),
        )
        .wrap(SessionGuard)
        .wrap(session_middleware(&settings))
        .wrap(
            DefaultHeaders::new()
                .add(("X-Content-Type-Options", "nosniff"))
                .add(("Referrer-Policy", "no-referrer"))
                .add(("Permissions-Policy", "geolocation=()"))
                .add(("Cross-Origin-Opener-Policy", "same-origin")),
        )
        .wrap(TimingMiddleware)
        .wrap(RequestIdMiddleware)
        .wrap(Logger::default())
        .wrap(build_cors(&settings.cors_origins))
        .service(health)
        .service(handlers::assets::static_asset)
        .service(handlers::article_api::scope())
        .service(handlers::article_view::index)
        .service(handlers::article_view::article_list)
        .service(handlers::article_view::article_detail)
        .service(handlers::article_view::new_article)
        .service(handlers::auth::login_page)
        .service(handlers::auth::login)
        .service(handlers::auth::signup_page)
        .service(handlers::auth::signup)
        .service(handlers::auth::logout)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
