pub mod article_service;
pub mod auth_service;
