use std::sync::Arc;

use tracing::{instrument, warn};

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::{NewUser, User, normalize_email};
use crate::infrastructure::security::{hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }

    #[instrument(skip(self, password))]
    pub async fn signup(&self, email: &str, password: &str) -> Result<User, DomainError> {
        if password.is_empty() {
            return Err(DomainError::Validation("password must not be empty".into()));
        }
        let hash =
            hash_password(password).map_err(|err| DomainError::Internal(err.to_string()))?;
        let user = NewUser::new(email, hash)?;
        self.repo.create(user).await
    }

    /// Unknown email and wrong password are reported identically.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        let valid = verify_password(password, user.password_hash()).map_err(|err| {
            warn!(user_id = user.id(), "stored password hash is unreadable: {}", err);
            DomainError::InvalidCredentials
        })?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::user_repository::InMemoryUserRepository;

    fn service() -> AuthService {
        AuthService::new(Arc::new(InMemoryUserRepository::new()))
    }

    #[tokio::test]
    async fn login_succeeds_only_with_the_signup_password() {
        let service = service();
        let user = service.signup("a@b.com", "pw123").await.unwrap();

        let logged_in = service.authenticate("a@b.com", "pw123").await.unwrap();
        assert_eq!(logged_in.id(), user.id());

        assert!(matches!(
            service.authenticate("a@b.com", "wrong").await,
            Err(DomainError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn unknown_email_is_invalid_credentials() {
        assert!(matches!(
            service().authenticate("nobody@b.com", "pw123").await,
            Err(DomainError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn stores_a_hash_not_the_password() {
        let user = service().signup("a@b.com", "pw123").await.unwrap();
        assert_ne!(user.password_hash(), "pw123");
        assert!(user.password_hash().starts_with("$argon2"));
    }

    #[tokio::test]
    async fn email_lookup_ignores_case() {
        let service = service();
        service.signup("A@B.com", "pw123").await.unwrap();
        assert!(service.authenticate("a@b.COM", "pw123").await.is_ok());
    }

    #[tokio::test]
    async fn empty_password_is_rejected() {
        assert!(matches!(
            service().signup("a@b.com", "").await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn second_signup_with_same_email_conflicts() {
        let service = service();
        service.signup("a@b.com", "pw123").await.unwrap();
        assert!(matches!(
            service.signup("a@b.com", "other").await,
            Err(DomainError::UserAlreadyExists(_))
        ));
    }
}
