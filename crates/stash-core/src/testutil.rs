//! Test utilities: an in-memory implementation of the store traits.
//!
//! `MemoryStore` uses `Arc<Mutex<_>>` so clones share data, letting tests
//! hand one copy to a service and inspect another.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Bookmark, BookmarkPatch, NewBookmark, NewUser, User, UserPatch};
use crate::traits::{BookmarkStore, Store, UserStore};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    bookmarks: Vec<Bookmark>,
}

/// In-memory store with the same uniqueness and ownership rules as PostgreSQL.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    /// Returned (once) by the next store call.
    error: Arc<Mutex<Option<AppError>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose next call fails with `error`.
    pub fn with_error(error: AppError) -> Self {
        Self {
            tables: Arc::default(),
            error: Arc::new(Mutex::new(Some(error))),
        }
    }

    /// Drop every user and bookmark.
    pub fn clear(&self) {
        let mut tables = self.tables.lock().unwrap();
        tables.users.clear();
        tables.bookmarks.clear();
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn bookmark_count(&self) -> usize {
        self.tables.lock().unwrap().bookmarks.len()
    }

    fn take_error(&self) -> Result<(), AppError> {
        match self.error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl UserStore for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError> {
        self.take_error()?;
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("email is already registered".into()));
        }
        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.take_error()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.take_error()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn update_user(&self, id: Uuid, patch: &UserPatch) -> Result<Option<User>, AppError> {
        self.take_error()?;
        let mut tables = self.tables.lock().unwrap();
        if let Some(email) = &patch.email {
            if tables.users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(AppError::Conflict("email is already registered".into()));
            }
        }
        let Some(user) = tables.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(email) = &patch.email {
            user.email = email.clone();
        }
        if let Some(first_name) = &patch.first_name {
            user.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &patch.last_name {
            user.last_name = Some(last_name.clone());
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

impl BookmarkStore for MemoryStore {
    async fn list_bookmarks(&self, user_id: Uuid) -> Result<Vec<Bookmark>, AppError> {
        self.take_error()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .bookmarks
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_bookmark(
        &self,
        user_id: Uuid,
        bookmark: &NewBookmark,
    ) -> Result<Bookmark, AppError> {
        self.take_error()?;
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.iter().any(|u| u.id == user_id) {
            return Err(AppError::NotFound(format!("User not found: {user_id}")));
        }
        let now = Utc::now();
        let created = Bookmark {
            id: Uuid::new_v4(),
            user_id,
            title: bookmark.title.clone(),
            link: bookmark.link.clone(),
            description: bookmark.description.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.bookmarks.push(created.clone());
        Ok(created)
    }

    async fn get_bookmark(&self, user_id: Uuid, id: Uuid) -> Result<Option<Bookmark>, AppError> {
        self.take_error()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .bookmarks
            .iter()
            .find(|b| b.id == id && b.user_id == user_id)
            .cloned())
    }

    async fn update_bookmark(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: &BookmarkPatch,
    ) -> Result<Option<Bookmark>, AppError> {
        self.take_error()?;
        let mut tables = self.tables.lock().unwrap();
        let Some(bookmark) = tables
            .bookmarks
            .iter_mut()
            .find(|b| b.id == id && b.user_id == user_id)
        else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            bookmark.title = title.clone();
        }
        if let Some(link) = &patch.link {
            bookmark.link = link.clone();
        }
        if let Some(description) = &patch.description {
            bookmark.description = Some(description.clone()).filter(|d| !d.is_empty());
        }
        bookmark.updated_at = Utc::now();
        Ok(Some(bookmark.clone()))
    }

    async fn delete_bookmark(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        self.take_error()?;
        let mut tables = self.tables.lock().unwrap();
        let before = tables.bookmarks.len();
        tables
            .bookmarks
            .retain(|b| !(b.id == id && b.user_id == user_id));
        Ok(tables.bookmarks.len() < before)
    }
}

impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), AppError> {
        self.take_error()
    }
}
