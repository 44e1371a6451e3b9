use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use stash_core::AppError;
use stash_core::models::{Bookmark, BookmarkPatch, NewBookmark, NewUser, User, UserPatch};
use stash_core::traits::{BookmarkStore, Store, UserStore};

use crate::bookmark_repository::BookmarkRepository;
use crate::config::DatabaseConfig;
use crate::user_repository::UserRepository;

/// Database facade. Owns the connection pool, runs migrations,
/// and vends repository instances.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL with the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect: {e}")))?;

        tracing::info!(max_connections = config.max_connections, "Connected to database");
        Ok(Self { pool })
    }

    /// Create a `Database` from an existing pool (useful for testing).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
        tracing::info!("Migrations applied");
        Ok(())
    }

    /// Delete every user and bookmark. Intended for test and dev resets.
    pub async fn truncate_all(&self) -> Result<(), AppError> {
        sqlx::query("TRUNCATE bookmarks, users")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get a [`UserRepository`] backed by this pool.
    pub fn user_repo(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Get a [`BookmarkRepository`] backed by this pool.
    pub fn bookmark_repo(&self) -> BookmarkRepository {
        BookmarkRepository::new(self.pool.clone())
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// -- Trait implementations, delegating to the repositories --

impl UserStore for Database {
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError> {
        self.user_repo().create_user(user).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.user_repo().find_by_email(email).await
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.user_repo().find_by_id(id).await
    }

    async fn update_user(&self, id: Uuid, patch: &UserPatch) -> Result<Option<User>, AppError> {
        self.user_repo().update(id, patch).await
    }
}

impl BookmarkStore for Database {
    async fn list_bookmarks(&self, user_id: Uuid) -> Result<Vec<Bookmark>, AppError> {
        self.bookmark_repo().list(user_id).await
    }

    async fn create_bookmark(
        &self,
        user_id: Uuid,
        bookmark: &NewBookmark,
    ) -> Result<Bookmark, AppError> {
        self.bookmark_repo().create(user_id, bookmark).await
    }

    async fn get_bookmark(&self, user_id: Uuid, id: Uuid) -> Result<Option<Bookmark>, AppError> {
        self.bookmark_repo().get(user_id, id).await
    }

    async fn update_bookmark(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: &BookmarkPatch,
    ) -> Result<Option<Bookmark>, AppError> {
        self.bookmark_repo().update(user_id, id, patch).await
    }

    async fn delete_bookmark(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        self.bookmark_repo().delete(user_id, id).await
    }
}

impl Store for Database {
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
