#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test;
use async_trait::async_trait;
use serde_json::Value;

use blog_web::application::article_service::ArticleService;
use blog_web::application::auth_service::AuthService;
use blog_web::data::article_repository::InMemoryArticleRepository;
use blog_web::data::user_repository::{InMemoryUserRepository, UserRepository};
use blog_web::domain::error::DomainError;
use blog_web::domain::user::{NewUser, User};
use blog_web::presentation::app::{AppState, HttpSettings, SESSION_COOKIE};
use blog_web::presentation::dto::{AddArticleRequest, CredentialsForm};

pub const EMAIL: &str = "a@b.com";
pub const PASSWORD: &str = "pw123";

pub fn settings() -> HttpSettings {
    HttpSettings {
        session_key: Key::generate(),
        cookie_secure: false,
        cors_origins: Vec::new(),
    }
}

pub fn credentials(email: &str, password: &str) -> CredentialsForm {
    CredentialsForm {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

pub fn location<B>(res: &ServiceResponse<B>) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

pub async fn signup<S, B>(app: &S, email: &str, password: &str) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/user")
            .set_form(credentials(email, password))
            .to_request(),
    )
    .await
}

pub async fn login<S, B>(app: &S, email: &str, password: &str) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(credentials(email, password))
            .to_request(),
    )
    .await
}

pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .expect("session cookie set")
        .into_owned()
}

/// Signs up the default user and returns the cookie of a fresh login.
pub async fn logged_in<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = signup(app, EMAIL, PASSWORD).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    let res = login(app, EMAIL, PASSWORD).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    session_cookie(&res)
}

pub async fn create_article<S, B>(app: &S, cookie: &Cookie<'static>, title: &str, content: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/articles")
            .cookie(cookie.clone())
            .set_json(AddArticleRequest {
                title: title.to_owned(),
                content: content.to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    test::read_body_json(res).await
}

pub async fn body_text<B: MessageBody>(res: ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(res).await.to_vec()).expect("utf-8 body")
}

/// User store whose id lookups can be switched to fail like a lost database.
#[derive(Default)]
pub struct UnreliableUsers {
    inner: InMemoryUserRepository,
    lookups_fail: AtomicBool,
}

impl UnreliableUsers {
    pub fn fail_lookups(&self) {
        self.lookups_fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepository for UnreliableUsers {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        self.inner.create(user).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.inner.find_by_email(email).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        if self.lookups_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal("db down".into()));
        }
        self.inner.find_by_id(id).await
    }
}

pub fn state_with_users(users: Arc<UnreliableUsers>) -> AppState {
    AppState {
        articles: ArticleService::new(Arc::new(InMemoryArticleRepository::new())),
        auth: AuthService::new(users),
    }
}
