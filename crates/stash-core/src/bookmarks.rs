use tracing::instrument;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Bookmark, BookmarkPatch, NewBookmark};
use crate::traits::BookmarkStore;
use crate::validation::{normalize_link, normalize_optional_text, normalize_text, normalize_title};

/// Bookmark CRUD scoped to a single owner.
///
/// Every operation takes the caller's user id; a bookmark owned by someone
/// else is reported exactly like a missing one.
#[derive(Debug, Clone)]
pub struct BookmarkService<S: BookmarkStore> {
    store: S,
}

impl<S: BookmarkStore> BookmarkService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Bookmark>, AppError> {
        self.store.list_bookmarks(user_id).await
    }

    #[instrument(name = "bookmarks.create", skip(self, input))]
    pub async fn create(&self, user_id: Uuid, input: NewBookmark) -> Result<Bookmark, AppError> {
        let bookmark = NewBookmark {
            title: normalize_title(&input.title)?,
            link: normalize_link(&input.link)?,
            description: normalize_optional_text("description", input.description.as_deref())?,
        };

        let created = self.store.create_bookmark(user_id, &bookmark).await?;
        tracing::info!(bookmark_id = %created.id, "Bookmark created");
        Ok(created)
    }

    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Bookmark, AppError> {
        self.store
            .get_bookmark(user_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Apply the supplied fields, validated as on create.
    ///
    /// A blank description clears it, matching create where blank means none.
    #[instrument(name = "bookmarks.edit", skip(self, patch))]
    pub async fn edit(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: BookmarkPatch,
    ) -> Result<Bookmark, AppError> {
        let patch = BookmarkPatch {
            title: patch.title.as_deref().map(normalize_title).transpose()?,
            link: patch.link.as_deref().map(normalize_link).transpose()?,
            description: patch
                .description
                .as_deref()
                .map(|s| normalize_text("description", s))
                .transpose()?,
        };

        if patch.is_empty() {
            return self.get(user_id, id).await;
        }

        self.store
            .update_bookmark(user_id, id, &patch)
            .await?
            .ok_or_else(|| not_found(id))
    }

    #[instrument(name = "bookmarks.delete", skip(self))]
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_bookmark(user_id, id).await? {
            return Err(not_found(id));
        }
        tracing::info!(bookmark_id = %id, "Bookmark deleted");
        Ok(())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Bookmark not found: {id}"))
}
