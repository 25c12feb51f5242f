pub mod article_repository;
pub mod user_repository;
