//! Authentication Module
//! Mission: Secure API access with bcrypt credentials and signed JWT tokens

pub mod api;
pub mod authenticator;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod user_store;

pub use authenticator::Authenticator;
pub use error::{AuthError, TokenError};
pub use jwt::JwtHandler;
pub use middleware::{auth_middleware, AccessGuard, GuardOutcome};
pub use models::{Credentials, Identity, Subject, TokenClaims};
pub use user_store::{CredentialStore, InMemoryCredentialStore};
