pub mod app;
pub mod auth;
pub mod handlers;
pub mod middleware;
pub mod schemas;
