//! Login Flow
//! Mission: Turn verified credentials into a signed token

use crate::auth::{
    error::AuthError,
    jwt::JwtHandler,
    models::{Credentials, IssuedToken, Subject},
    user_store::CredentialStore,
};
use chrono::{DateTime, Utc};
use std::{sync::Arc, time::Duration};
use tracing::{error, info, warn};

/// Credential check followed by token issuance
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    jwt_handler: Arc<JwtHandler>,
    token_ttl: Duration,
}

impl Authenticator {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        jwt_handler: Arc<JwtHandler>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            store,
            jwt_handler,
            token_ttl,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    pub fn login(&self, credentials: &Credentials) -> Result<IssuedToken, AuthError> {
        self.login_at(credentials, Utc::now())
    }

    pub fn login_at(
        &self,
        credentials: &Credentials,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        if !self
            .store
            .verify(&credentials.username, &credentials.password)
        {
            warn!("❌ Failed login attempt: {}", credentials.username);
            return Err(AuthError::InvalidCredentials);
        }

        let identity = self
            .store
            .find(&credentials.username)
            .ok_or(AuthError::InvalidCredentials)?;

        let issued = self
            .jwt_handler
            .issue_at(&Subject::from(&identity), self.token_ttl, now)
            .map_err(|e| {
                error!("Token issuance failed: {}", e);
                AuthError::from(e)
            })?;

        info!("✅ Login successful: {}", identity.username);

        Ok(issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{error::TokenError, user_store::InMemoryCredentialStore};
    use chrono::TimeZone;

    const HOUR: Duration = Duration::from_secs(3600);

    fn create_authenticator() -> (Authenticator, Arc<JwtHandler>) {
        let store = InMemoryCredentialStore::new("user1", "admin", "password123", 4).unwrap();
        let jwt_handler = Arc::new(JwtHandler::new("test-secret-key-12345"));
        let authenticator = Authenticator::new(Arc::new(store), jwt_handler.clone(), HOUR);
        (authenticator, jwt_handler)
    }

    #[test]
    fn test_login_issues_verifiable_token() {
        let (authenticator, jwt_handler) = create_authenticator();

        let issued = authenticator
            .login(&Credentials::new("admin", "password123"))
            .unwrap();
        assert_eq!(issued.expires_in, 3600);

        let claims = jwt_handler.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, "user1");
        assert_eq!(claims.username, "admin");
    }

    #[test]
    fn test_bad_credentials_are_indistinguishable() {
        let (authenticator, _) = create_authenticator();

        let wrong_password = authenticator.login(&Credentials::new("admin", "wrong"));
        let unknown_user = authenticator.login(&Credentials::new("ghost", "password123"));
        let empty = authenticator.login(&Credentials::default());

        assert_eq!(wrong_password, Err(AuthError::InvalidCredentials));
        assert_eq!(unknown_user, wrong_password);
        assert_eq!(empty, wrong_password);
    }

    #[test]
    fn test_token_lifetime_follows_configured_ttl() {
        let store = InMemoryCredentialStore::new("user1", "admin", "password123", 4).unwrap();
        let jwt_handler = Arc::new(JwtHandler::new("test-secret-key-12345"));
        let authenticator =
            Authenticator::new(Arc::new(store), jwt_handler.clone(), Duration::from_secs(60));
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let issued = authenticator
            .login_at(&Credentials::new("admin", "password123"), t0)
            .unwrap();

        assert!(jwt_handler
            .verify_at(&issued.token, t0 + chrono::Duration::seconds(59))
            .is_ok());
        assert_eq!(
            jwt_handler.verify_at(&issued.token, t0 + chrono::Duration::seconds(60)),
            Err(TokenError::Expired)
        );
    }
}
