use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;

/// A registered credential. Not `Serialize`: the password hash must never
/// appear in a response.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    id: i64,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn stored(id: i64, new_user: NewUser, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A credential ready to be stored. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    email: String,
    password_hash: String,
}

impl NewUser {
    pub fn new(email: &str, password_hash: String) -> Result<Self, DomainError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(DomainError::Validation("email must not be empty".into()));
        }
        Ok(Self {
            email,
            password_hash,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let user = NewUser::new("  A@B.Com ", "hash".into()).unwrap();
        assert_eq!(user.email(), "a@b.com");
    }

    #[test]
    fn blank_email_is_rejected() {
        assert!(matches!(
            NewUser::new("   ", "hash".into()),
            Err(DomainError::Validation(_))
        ));
    }
}
