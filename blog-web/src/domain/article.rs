use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::error::DomainError;

/// A stored blog post.
///
/// Instances come from the article store, which assigns the id and the
/// timestamps. Callers describe new content with [`NewArticle`].
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Article {
    id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Article {
    pub(crate) fn stored(id: i64, draft: NewArticle, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn revise(&mut self, draft: NewArticle, now: DateTime<Utc>) {
        self.title = draft.title;
        self.content = draft.content;
        self.updated_at = now;
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Validated title and content, used both for creation and for updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    title: String,
    content: String,
}

impl NewArticle {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        let content = content.into();
        if title.trim().is_empty() {
            return Err(DomainError::Validation("title must not be empty".into()));
        }
        if content.trim().is_empty() {
            return Err(DomainError::Validation("content must not be empty".into()));
        }
        Ok(Self { title, content })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "body")]
    #[case("   ", "body")]
    #[case("title", "")]
    #[case("title", "\n\t")]
    fn rejects_blank_fields(#[case] title: &str, #[case] content: &str) {
        let err = NewArticle::new(title, content).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn revise_replaces_both_fields_and_bumps_updated_at() {
        let created = Utc::now();
        let mut article = Article::stored(1, NewArticle::new("a", "b").unwrap(), created);
        let later = created + chrono::Duration::seconds(5);

        article.revise(NewArticle::new("c", "d").unwrap(), later);

        assert_eq!(article.id(), 1);
        assert_eq!(article.title(), "c");
        assert_eq!(article.content(), "d");
        assert_eq!(article.created_at(), created);
        assert_eq!(article.updated_at(), later);
    }
}
