use thiserror::Error;

/// Application-wide error types for Stash.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request input is missing, empty, or malformed.
    #[error("{0}")]
    Validation(String),

    /// Signin email/password pair does not match a stored user.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Bearer token missing, invalid, expired, or naming an unknown user.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource does not exist or is not owned by the caller.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness constraint was violated.
    #[error("{0}")]
    Conflict(String),

    /// Token could not be signed.
    #[error("Token error: {0}")]
    Token(String),

    /// Password could not be hashed, or a stored hash is unreadable.
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Returns true if the error is the caller's fault (4xx territory).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::InvalidCredentials
                | AppError::Unauthorized(_)
                | AppError::NotFound(_)
                | AppError::Conflict(_)
        )
    }
}
