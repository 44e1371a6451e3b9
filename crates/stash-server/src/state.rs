use stash_core::{AuthService, BookmarkService, Store, TokenService, UserService};

/// Shared application state, available to all route handlers via `State<Arc<AppState<S>>>`.
pub struct AppState<S: Store> {
    pub store: S,
    pub auth: AuthService<S>,
    pub users: UserService<S>,
    pub bookmarks: BookmarkService<S>,
}

impl<S: Store> AppState<S> {
    /// Wire every service to the same store handle.
    pub fn new(store: S, tokens: TokenService) -> Self {
        Self {
            auth: AuthService::new(store.clone(), tokens),
            users: UserService::new(store.clone()),
            bookmarks: BookmarkService::new(store.clone()),
            store,
        }
    }

    pub fn with_min_password_len(mut self, len: usize) -> Self {
        self.auth = self.auth.with_min_password_len(len);
        self
    }
}
