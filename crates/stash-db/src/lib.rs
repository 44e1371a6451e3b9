//! PostgreSQL persistence for users and bookmarks.

pub mod bookmark_repository;
pub mod config;
pub mod database;
pub mod user_repository;

pub use bookmark_repository::BookmarkRepository;
pub use config::DatabaseConfig;
pub use database::Database;
pub use user_repository::UserRepository;
