use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::domain::error::DomainError;
use crate::domain::user::{NewUser, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(user.email())
        .bind(user.password_hash())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .and_then(|db| db.constraint())
                .map(|c| c.contains("users_email"))
                == Some(true)
            {
                DomainError::UserAlreadyExists(user.email().to_string())
            } else {
                error!("failed to create user: {}", e);
                DomainError::Internal(format!("database error: {}", e))
            }
        })?;

        info!(user_id = created.id(), email = %created.email(), "user created");
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find user by email {}: {}", email, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find user by id {}: {}", id, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

#[derive(Default)]
struct UserTable {
    by_id: HashMap<i64, User>,
    ids_by_email: HashMap<String, i64>,
    last_id: i64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut table = self.table.write().await;
        if table.ids_by_email.contains_key(user.email()) {
            return Err(DomainError::UserAlreadyExists(user.email().to_string()));
        }
        table.last_id += 1;
        let created = User::stored(table.last_id, user, Utc::now());
        table
            .ids_by_email
            .insert(created.email().to_string(), created.id());
        table.by_id.insert(created.id(), created.clone());

        info!(user_id = created.id(), email = %created.email(), "user created");
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .ids_by_email
            .get(email)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(self.table.read().await.by_id.get(&id).cloned())
    }
}
