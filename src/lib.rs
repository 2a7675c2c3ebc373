pub mod core;
pub mod models;
pub mod db;
pub mod sessions;
pub mod auth;
pub mod mail;
pub mod utils;
pub mod handlers;
