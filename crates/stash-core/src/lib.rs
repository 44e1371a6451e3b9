//! Domain types, store traits, and services for the Stash bookmark API.

pub mod auth;
pub mod bookmarks;
pub mod error;
pub mod models;
pub mod password;
pub mod token;
pub mod traits;
pub mod users;
pub mod validation;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use auth::AuthService;
pub use bookmarks::BookmarkService;
pub use error::AppError;
pub use models::{Bookmark, BookmarkPatch, NewBookmark, NewUser, User, UserPatch};
pub use token::{AccessToken, Claims, TokenService};
pub use traits::{BookmarkStore, Store, UserStore};
pub use users::UserService;
