use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};
use askama::Template;

use crate::application::article_service::ArticleService;
use crate::domain::article::Article;
use crate::presentation::dto::NewArticleQuery;
use crate::presentation::pages::{PageError, render};
use crate::presentation::utils::{AuthenticatedUser, redirect};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

struct ArticleListItem {
    id: i64,
    title: String,
    content: String,
}

/// Template model of a single article. An unsaved article has no id.
struct ArticleView {
    id: Option<i64>,
    title: String,
    content: String,
    created_at: String,
    updated_at: String,
}

impl ArticleView {
    fn empty() -> Self {
        Self {
            id: None,
            title: String::new(),
            content: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }
}

impl From<Article> for ArticleView {
    fn from(article: Article) -> Self {
        Self {
            id: Some(article.id()),
            created_at: article.created_at().format(DATE_FORMAT).to_string(),
            updated_at: article.updated_at().format(DATE_FORMAT).to_string(),
            title: article.title().to_owned(),
            content: article.content().to_owned(),
        }
    }
}

#[derive(Template)]
#[template(path = "article_list.html")]
struct ArticleListTemplate {
    user_email: String,
    articles: Vec<ArticleListItem>,
}

#[derive(Template)]
#[template(path = "article.html")]
struct ArticleTemplate {
    user_email: String,
    article: ArticleView,
}

#[derive(Template)]
#[template(path = "new_article.html")]
struct NewArticleTemplate {
    user_email: String,
    article: ArticleView,
}

#[get("/")]
async fn index() -> HttpResponse {
    redirect("/articles")
}

#[get("/articles")]
async fn article_list(
    user: AuthenticatedUser,
    service: web::Data<ArticleService>,
) -> Result<HttpResponse, PageError> {
    let articles = service
        .list()
        .await?
        .into_iter()
        .map(|article| ArticleListItem {
            id: article.id(),
            title: article.title().to_owned(),
            content: article.content().to_owned(),
        })
        .collect();

    let page = ArticleListTemplate {
        user_email: user.email,
        articles,
    };
    Ok(render(StatusCode::OK, &page)?)
}

#[get("/articles/{id}")]
async fn article_detail(
    user: AuthenticatedUser,
    service: web::Data<ArticleService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, PageError> {
    let article = service.get_by_id(path.into_inner()).await?;

    let page = ArticleTemplate {
        user_email: user.email,
        article: article.into(),
    };
    Ok(render(StatusCode::OK, &page)?)
}

/// Editor page: blank for a new article, prefilled when `?id=` names an
/// existing one.
#[get("/new-article")]
async fn new_article(
    user: AuthenticatedUser,
    service: web::Data<ArticleService>,
    query: web::Query<NewArticleQuery>,
) -> Result<HttpResponse, PageError> {
    let article = match query.id {
        Some(id) => ArticleView::from(service.get_by_id(id).await?),
        None => ArticleView::empty(),
    };

    let page = NewArticleTemplate {
        user_email: user.email,
        article,
    };
    Ok(render(StatusCode::OK, &page)?)
}
