use actix_web::{HttpRequest, HttpResponse, Scope, delete, get, post, put, web};
use tracing::info;

use crate::application::article_service::ArticleService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{AddArticleRequest, ArticleResponse, UpdateArticleRequest};
use crate::presentation::utils::{AuthenticatedUser, request_id};

pub fn scope() -> Scope {
    web::scope("/api/articles")
        .service(add_article)
        .service(find_all_articles)
        .service(find_article)
        .service(update_article)
        .service(delete_article)
}

#[post("")]
async fn add_article(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<ArticleService>,
    payload: web::Json<AddArticleRequest>,
) -> Result<HttpResponse, DomainError> {
    let AddArticleRequest { title, content } = payload.into_inner();
    let article = service.create(title, content).await?;

    info!(
        request_id = %request_id(&req),
        email = %user.email,
        article_id = article.id(),
        "article created"
    );

    Ok(HttpResponse::Created().json(article))
}

#[get("")]
async fn find_all_articles(
    service: web::Data<ArticleService>,
) -> Result<HttpResponse, DomainError> {
    let articles: Vec<ArticleResponse> = service
        .list()
        .await?
        .iter()
        .map(ArticleResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(articles))
}

#[get("/{id}")]
async fn find_article(
    service: web::Data<ArticleService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let article = service.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ArticleResponse::from(&article)))
}

#[put("/{id}")]
async fn update_article(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<ArticleService>,
    path: web::Path<i64>,
    payload: web::Json<UpdateArticleRequest>,
) -> Result<HttpResponse, DomainError> {
    let article_id = path.into_inner();
    let UpdateArticleRequest { title, content } = payload.into_inner();
    let article = service.update(article_id, title, content).await?;

    info!(
        request_id = %request_id(&req),
        email = %user.email,
        article_id,
        "article updated"
    );

    Ok(HttpResponse::Ok().json(article))
}

#[delete("/{id}")]
async fn delete_article(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<ArticleService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let article_id = path.into_inner();
    service.delete(article_id).await?;

    info!(
        request_id = %request_id(&req),
        email = %user.email,
        article_id,
        "article deleted"
    );

    Ok(HttpResponse::Ok().finish())
}
