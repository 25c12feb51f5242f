use crate::domain::article::Article;
use serde::{Deserialize, Serialize};

// ======================= ARTICLES =======================

#[derive(Debug, Serialize, Deserialize)]
pub struct AddArticleRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: String,
    pub content: String,
}

/// Public shape of an article on the read endpoints.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleResponse {
    pub title: String,
    pub content: String,
}

impl From<&Article> for ArticleResponse {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title().to_owned(),
            content: article.content().to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewArticleQuery {
    #[serde(default)]
    pub id: Option<i64>,
}

// ======================= AUTH =======================

/// Form body of both `POST /login` and `POST /user`. Missing fields read as
/// empty so the handlers re-render the form instead of failing extraction.
#[derive(Debug, Serialize, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
