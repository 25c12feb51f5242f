use std::sync::Arc;

use tracing::instrument;

use crate::data::article_repository::ArticleRepository;
use crate::domain::article::{Article, NewArticle};
use crate::domain::error::DomainError;

#[derive(Clone)]
pub struct ArticleService {
    repo: Arc<dyn ArticleRepository>,
}

impl ArticleService {
    pub fn new(repo: Arc<dyn ArticleRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, content))]
    pub async fn create(&self, title: String, content: String) -> Result<Article, DomainError> {
        let draft = NewArticle::new(title, content)?;
        self.repo.create(draft).await
    }

    pub async fn list(&self) -> Result<Vec<Article>, DomainError> {
        self.repo.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Article, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ArticleNotFound(id))
    }

    #[instrument(skip(self, content))]
    pub async fn update(
        &self,
        id: i64,
        title: String,
        content: String,
    ) -> Result<Article, DomainError> {
        let draft = NewArticle::new(title, content)?;
        self.repo
            .update(id, draft)
            .await?
            .ok_or(DomainError::ArticleNotFound(id))
    }

    /// Deleting an unknown id is a no-op.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete(id).await?;
        Ok(())
    }
}
