use tracing::instrument;

use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::password::{hash_password, verify_dummy, verify_password, warm_dummy_hash};
use crate::token::{AccessToken, TokenService};
use crate::traits::UserStore;
use crate::validation::{check_password, normalize_email};

/// Signup, signin, and bearer-token resolution over a [`UserStore`].
#[derive(Debug, Clone)]
pub struct AuthService<S: UserStore> {
    store: S,
    tokens: TokenService,
    min_password_len: usize,
}

impl<S: UserStore> AuthService<S> {
    pub fn new(store: S, tokens: TokenService) -> Self {
        warm_dummy_hash();
        Self {
            store,
            tokens,
            min_password_len: 1,
        }
    }

    /// Require passwords of at least `len` characters at signup.
    pub fn with_min_password_len(mut self, len: usize) -> Self {
        self.min_password_len = len.max(1);
        self
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Register a new account and sign it in.
    #[instrument(name = "auth.signup", skip(self, password))]
    pub async fn signup(&self, email: &str, password: &str) -> Result<AccessToken, AppError> {
        let email = normalize_email(email)?;
        check_password(password, self.min_password_len)?;

        let password_hash = hash_password(password)?;
        let user = self
            .store
            .create_user(&NewUser {
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        self.tokens.issue(user.id, &user.email)
    }

    /// Exchange an email/password pair for an access token.
    #[instrument(name = "auth.signin", skip(self, password))]
    pub async fn signin(&self, email: &str, password: &str) -> Result<AccessToken, AppError> {
        let email = normalize_email(email)?;
        check_password(password, 1)?;

        let Some(user) = self.store.find_user_by_email(&email).await? else {
            verify_dummy(password);
            tracing::warn!("Signin failed: unknown email");
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "Signin failed: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User signed in");
        self.tokens.issue(user.id, &user.email)
    }

    /// Resolve a bearer token to the user it names.
    ///
    /// Fails with [`AppError::Unauthorized`] on a bad or expired token and
    /// when the subject no longer exists.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let claims = self.tokens.verify(token)?;
        self.store
            .find_user_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("unknown user".into()))
    }
}
