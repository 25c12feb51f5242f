//! Thin wrapper around the Actix session so handlers and the session guard
//! only deal with the logged-in user id.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::error::DomainError;

pub(crate) const USER_ID_KEY: &str = "user_id";

#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Marks the session as authenticated. The session id is renewed first.
    pub fn persist_user(&self, user_id: i64) -> Result<(), DomainError> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id)
            .map_err(|error| DomainError::Internal(format!("failed to persist session: {error}")))
    }

    /// The logged-in user id. An unreadable value counts as anonymous.
    pub fn user_id(&self) -> Option<i64> {
        match self.0.get::<i64>(USER_ID_KEY) {
            Ok(id) => id,
            Err(error) => {
                warn!("invalid user id in session cookie: {error}");
                None
            }
        }
    }

    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
