use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, get, post, web};
use askama::Template;
use tracing::{info, warn};

use crate::application::auth_service::AuthService;
use crate::domain::error::DomainError;
use crate::presentation::dto::CredentialsForm;
use crate::presentation::middleware::LOGIN_PATH;
use crate::presentation::pages::{PageError, render};
use crate::presentation::session::SessionContext;
use crate::presentation::utils::redirect;

const LOGIN_SUCCESS_PATH: &str = "/articles";

#[derive(Template, Default)]
#[template(path = "login.html")]
struct LoginTemplate {
    email: String,
    error: String,
}

#[derive(Template, Default)]
#[template(path = "signup.html")]
struct SignupTemplate {
    email: String,
    error: String,
}

#[get("/login")]
async fn login_page() -> Result<HttpResponse, PageError> {
    Ok(render(StatusCode::OK, &LoginTemplate::default())?)
}

#[post("/login")]
async fn login(
    service: web::Data<AuthService>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> Result<HttpResponse, PageError> {
    let CredentialsForm { email, password } = form.into_inner();

    match service.authenticate(&email, &password).await {
        Ok(user) => {
            session.persist_user(user.id())?;
            info!(user_id = user.id(), email = %user.email(), "user logged in");
            Ok(redirect(LOGIN_SUCCESS_PATH))
        }
        Err(DomainError::InvalidCredentials) => {
            warn!(email = %email, "login failed");
            let page = LoginTemplate {
                email,
                error: "Invalid email or password.".to_owned(),
            };
            Ok(render(StatusCode::UNAUTHORIZED, &page)?)
        }
        Err(err) => Err(err.into()),
    }
}

#[get("/signup")]
async fn signup_page() -> Result<HttpResponse, PageError> {
    Ok(render(StatusCode::OK, &SignupTemplate::default())?)
}

#[post("/user")]
async fn signup(
    service: web::Data<AuthService>,
    form: web::Form<CredentialsForm>,
) -> Result<HttpResponse, PageError> {
    let CredentialsForm { email, password } = form.into_inner();

    match service.signup(&email, &password).await {
        Ok(user) => {
            info!(user_id = user.id(), email = %user.email(), "user registered");
            Ok(redirect(LOGIN_PATH))
        }
        Err(err @ (DomainError::Validation(_) | DomainError::UserAlreadyExists(_))) => {
            let page = SignupTemplate {
                email,
                error: err.to_string(),
            };
            Ok(render(err.status_code(), &page)?)
        }
        Err(err) => Err(err.into()),
    }
}

#[get("/logout")]
async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    redirect(LOGIN_PATH)
}
