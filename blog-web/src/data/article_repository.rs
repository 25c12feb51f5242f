use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::domain::article::{Article, NewArticle};
use crate::domain::error::DomainError;

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn create(&self, draft: NewArticle) -> Result<Article, DomainError>;
    async fn find_all(&self) -> Result<Vec<Article>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Article>, DomainError>;
    /// Replaces title and content. `None` when no article has this id.
    async fn update(&self, id: i64, draft: NewArticle) -> Result<Option<Article>, DomainError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

#[derive(Clone)]
pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn create(&self, draft: NewArticle) -> Result<Article, DomainError> {
        let now = Utc::now();
        let article = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (title, content, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id, title, content, created_at, updated_at
            "#,
        )
        .bind(draft.title())
        .bind(draft.content())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create article: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(article_id = article.id(), "article created");
        Ok(article)
    }

    async fn find_all(&self) -> Result<Vec<Article>, DomainError> {
        sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, content, created_at, updated_at
            FROM articles
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching articles: {}", e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Article>, DomainError> {
        sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, content, created_at, updated_at
            FROM articles WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn update(&self, id: i64, draft: NewArticle) -> Result<Option<Article>, DomainError> {
        let now = Utc::now();
        let article = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET title = $1, content = $2, updated_at = $3
            WHERE id = $4
            RETURNING id, title, content, created_at, updated_at
            "#,
        )
        .bind(draft.title())
        .bind(draft.content())
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update article {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })?;

        if article.is_some() {
            info!(article_id = id, "article updated");
        }

        Ok(article)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete article {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })?;

        let removed = deleted.rows_affected() > 0;
        if removed {
            info!(article_id = id, "article deleted");
        }
        Ok(removed)
    }
}

/// Process-local article store, used when no database is configured.
#[derive(Default)]
pub struct InMemoryArticleRepository {
    table: RwLock<ArticleTable>,
}

#[derive(Default)]
struct ArticleTable {
    rows: BTreeMap<i64, Article>,
    // ids are never handed out twice, even after deletes
    last_id: i64,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn create(&self, draft: NewArticle) -> Result<Article, DomainError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let article = Article::stored(table.last_id, draft, Utc::now());
        table.rows.insert(article.id(), article.clone());

        info!(article_id = article.id(), "article created");
        Ok(article)
    }

    async fn find_all(&self) -> Result<Vec<Article>, DomainError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Article>, DomainError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, draft: NewArticle) -> Result<Option<Article>, DomainError> {
        let mut table = self.table.write().await;
        let Some(article) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        article.revise(draft, Utc::now());

        info!(article_id = id, "article updated");
        Ok(Some(article.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let removed = self.table.write().await.rows.remove(&id).is_some();
        if removed {
            info!(article_id = id, "article deleted");
        }
        Ok(removed)
    }
}
