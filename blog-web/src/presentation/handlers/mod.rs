pub mod article_api;
pub mod article_view;
pub mod assets;
pub mod auth;
