use tracing::instrument;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{User, UserPatch};
use crate::traits::UserStore;
use crate::validation::{normalize_email, normalize_name};

/// Profile reads and edits for the authenticated user.
#[derive(Debug, Clone)]
pub struct UserService<S: UserStore> {
    store: S,
}

impl<S: UserStore> UserService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn get(&self, user_id: Uuid) -> Result<User, AppError> {
        self.store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User not found: {user_id}")))
    }

    /// Apply the supplied profile fields; absent fields are left as stored.
    ///
    /// A new email is validated and normalized like at signup, and must not
    /// belong to another account.
    #[instrument(name = "users.edit", skip(self, patch))]
    pub async fn edit(&self, user_id: Uuid, patch: UserPatch) -> Result<User, AppError> {
        let patch = UserPatch {
            email: patch.email.as_deref().map(normalize_email).transpose()?,
            first_name: patch
                .first_name
                .as_deref()
                .map(|s| normalize_name("firstName", s))
                .transpose()?,
            last_name: patch
                .last_name
                .as_deref()
                .map(|s| normalize_name("lastName", s))
                .transpose()?,
        };

        if patch.is_empty() {
            return self.get(user_id).await;
        }

        let user = self
            .store
            .update_user(user_id, &patch)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User not found: {user_id}")))?;

        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }
}
