use std::time::Duration;

use clap::Parser;

use stash_core::{AppError, TokenService};

/// Server settings, read from flags or the environment.
///
/// The database is configured separately through `DatabaseConfig::from_env`.
#[derive(Clone, Parser)]
#[command(name = "stash-server", version, about = "Bookmark API server")]
pub struct ServerConfig {
    /// Bind address
    #[arg(long, env = "STASH_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Bind port
    #[arg(short, long, env = "STASH_PORT", default_value_t = 3333)]
    pub port: u16,

    /// HMAC secret for signing access tokens (at least 16 bytes)
    #[arg(long, env = "STASH_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Access token lifetime in seconds
    #[arg(
        long,
        env = "STASH_JWT_TTL_SECS",
        default_value_t = 900,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub jwt_ttl_secs: u64,

    /// Minimum password length accepted at signup
    #[arg(long, env = "STASH_MIN_PASSWORD_LEN", default_value_t = 1)]
    pub min_password_len: usize,

    /// Maximum request body size in bytes
    #[arg(long, env = "STASH_BODY_LIMIT", default_value_t = 64 * 1024)]
    pub body_limit: usize,

    /// Do not apply database migrations on startup
    #[arg(long, env = "STASH_SKIP_MIGRATIONS")]
    pub skip_migrations: bool,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn token_service(&self) -> Result<TokenService, AppError> {
        TokenService::new(
            self.jwt_secret.as_bytes(),
            Duration::from_secs(self.jwt_ttl_secs),
        )
    }
}
