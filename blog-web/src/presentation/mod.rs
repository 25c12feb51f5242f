pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod session;
pub mod utils;
