use std::future::Future;

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Bookmark, BookmarkPatch, NewBookmark, NewUser, User, UserPatch};

/// Persists and retrieves user accounts.
pub trait UserStore: Send + Sync + Clone {
    /// Insert a user. Fails with [`AppError::Conflict`] if the email is taken.
    fn create_user(&self, user: &NewUser) -> impl Future<Output = Result<User, AppError>> + Send;

    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    fn find_user_by_id(&self, id: Uuid)
    -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    /// Apply a partial update. Returns `None` if the user does not exist.
    fn update_user(
        &self,
        id: Uuid,
        patch: &UserPatch,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;
}

/// Persists bookmarks. Every lookup is scoped to the owning user.
pub trait BookmarkStore: Send + Sync + Clone {
    /// All bookmarks owned by `user_id`, oldest first.
    fn list_bookmarks(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Bookmark>, AppError>> + Send;

    fn create_bookmark(
        &self,
        user_id: Uuid,
        bookmark: &NewBookmark,
    ) -> impl Future<Output = Result<Bookmark, AppError>> + Send;

    fn get_bookmark(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Bookmark>, AppError>> + Send;

    /// Returns `None` if no bookmark `id` is owned by `user_id`.
    fn update_bookmark(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: &BookmarkPatch,
    ) -> impl Future<Output = Result<Option<Bookmark>, AppError>> + Send;

    /// Returns `false` if no bookmark `id` is owned by `user_id`.
    fn delete_bookmark(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = Result<bool, AppError>> + Send;
}

/// The full system of record: users plus their bookmarks.
pub trait Store: UserStore + BookmarkStore + 'static {
    /// Check store connectivity.
    fn health_check(&self) -> impl Future<Output = Result<(), AppError>> + Send;
}
