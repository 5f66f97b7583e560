//! Server configuration
//!
//! Every setting comes from a flag or its environment variable; `.env` files
//! are loaded before parsing. The signing secret has no default.

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;
use std::{fmt, time::Duration};

#[derive(Parser, Clone)]
#[command(name = "bookshelf")]
#[command(about = "Users and books REST API with bearer-token authentication")]
pub struct Config {
    /// Listen address
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: String,

    /// HMAC secret used to sign and verify tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Token validity window in seconds
    #[arg(long, env = "TOKEN_TTL_SECS", default_value = "3600")]
    pub token_ttl_secs: u64,

    /// Id of the single known identity
    #[arg(long, env = "ADMIN_ID", default_value = "user1")]
    pub admin_id: String,

    /// Username of the single known identity
    #[arg(long, env = "ADMIN_USERNAME", default_value = "admin")]
    pub admin_username: String,

    /// Password of the single known identity (hashed at start-up)
    #[arg(long, env = "ADMIN_PASSWORD", default_value = "password123", hide_env_values = true, hide_default_value = true)]
    pub admin_password: String,

    /// bcrypt work factor
    #[arg(long, env = "BCRYPT_COST", default_value = "10")]
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Reject settings that would leave the server unable to authenticate
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }
        if self.token_ttl_secs == 0 {
            bail!("TOKEN_TTL_SECS must be greater than zero");
        }
        let expiry = chrono::Duration::from_std(self.token_ttl())
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));
        if expiry.is_none() {
            bail!("TOKEN_TTL_SECS is too large, got {}", self.token_ttl_secs);
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31, got {}", self.bcrypt_cost);
        }
        if self.admin_username.is_empty() {
            bail!("ADMIN_USERNAME must not be empty");
        }
        Ok(())
    }
}

// Secrets stay out of logs and panic messages.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind", &self.bind)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("admin_id", &self.admin_id)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}
