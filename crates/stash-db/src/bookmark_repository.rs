use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use stash_core::error::AppError;
use stash_core::models::{Bookmark, BookmarkPatch, NewBookmark};
use stash_core::traits::BookmarkStore;

const BOOKMARK_COLUMNS: &str = "id, user_id, title, link, description, created_at, updated_at";

/// Repository for bookmarks in PostgreSQL.
///
/// Every statement filters on `user_id` as well as `id`, so a caller can
/// never read or touch a row it does not own.
#[derive(Clone)]
pub struct BookmarkRepository {
    pool: Pool<Postgres>,
}

impl BookmarkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All bookmarks of a user, oldest first.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Bookmark>, AppError> {
        let rows = sqlx::query_as::<_, BookmarkRow>(&format!(
            "SELECT {BOOKMARK_COLUMNS} FROM bookmarks WHERE user_id = $1 ORDER BY created_at, id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create(&self, user_id: Uuid, bookmark: &NewBookmark) -> Result<Bookmark, AppError> {
        let row = sqlx::query_as::<_, BookmarkRow>(&format!(
            r#"
            INSERT INTO bookmarks (user_id, title, link, description)
            VALUES ($1, $2, $3, $4)
            RETURNING {BOOKMARK_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&bookmark.title)
        .bind(&bookmark.link)
        .bind(&bookmark.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::NotFound(format!("User not found: {user_id}"))
            }
            _ => AppError::Database(e.to_string()),
        })?;

        Ok(row.into())
    }

    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<Bookmark>, AppError> {
        let row = sqlx::query_as::<_, BookmarkRow>(&format!(
            "SELECT {BOOKMARK_COLUMNS} FROM bookmarks WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: &BookmarkPatch,
    ) -> Result<Option<Bookmark>, AppError> {
        let row = sqlx::query_as::<_, BookmarkRow>(&format!(
            r#"
            UPDATE bookmarks
            SET title = COALESCE($3, title),
                link = COALESCE($4, link),
                description = NULLIF(COALESCE($5, description), ''),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {BOOKMARK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(&patch.title)
        .bind(&patch.link)
        .bind(&patch.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Returns whether a row was deleted.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct BookmarkRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    link: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookmarkRow> for Bookmark {
    fn from(row: BookmarkRow) -> Self {
        Bookmark {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            link: row.link,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// -- Trait implementation --

impl BookmarkStore for BookmarkRepository {
    async fn list_bookmarks(&self, user_id: Uuid) -> Result<Vec<Bookmark>, AppError> {
        self.list(user_id).await
    }

    async fn create_bookmark(
        &self,
        user_id: Uuid,
        bookmark: &NewBookmark,
    ) -> Result<Bookmark, AppError> {
        self.create(user_id, bookmark).await
    }

    async fn get_bookmark(&self, user_id: Uuid, id: Uuid) -> Result<Option<Bookmark>, AppError> {
        self.get(user_id, id).await
    }

    async fn update_bookmark(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: &BookmarkPatch,
    ) -> Result<Option<Bookmark>, AppError> {
        self.update(user_id, id, patch).await
    }

    async fn delete_bookmark(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        self.delete(user_id, id).await
    }
}
