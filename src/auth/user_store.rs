//! Credential Storage
//! Mission: Hold the known identity and check passwords against its bcrypt digest

use crate::auth::models::Identity;
use anyhow::{Context, Result};
use bcrypt::{hash, verify};
use tracing::{error, info};

/// Answers "does this password belong to this username?"
///
/// Unknown usernames and wrong passwords are indistinguishable to callers.
pub trait CredentialStore: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;

    fn find(&self, username: &str) -> Option<Identity>;
}

/// Single-identity store, read-only after construction
#[derive(Debug)]
pub struct InMemoryCredentialStore {
    identity: Identity,
}

impl InMemoryCredentialStore {
    /// Hash `password` once and keep only the digest
    pub fn new(id: &str, username: &str, password: &str, cost: u32) -> Result<Self> {
        let password_digest = hash(password, cost).context("Failed to hash password")?;

        info!("🔐 Credential store ready for user: {}", username);

        Ok(Self::from_identity(Identity {
            id: id.to_string(),
            username: username.to_string(),
            password_digest,
        }))
    }

    pub fn from_identity(identity: Identity) -> Self {
        Self { identity }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn verify(&self, username: &str, password: &str) -> bool {
        // Always run the digest check so unknown users take the same path.
        let password_ok = match verify(password, &self.identity.password_digest) {
            Ok(valid) => valid,
            Err(e) => {
                error!("Failed to verify password digest: {}", e);
                false
            }
        };

        password_ok && username == self.identity.username
    }

    fn find(&self, username: &str) -> Option<Identity> {
        (username == self.identity.username).then(|| self.identity.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> InMemoryCredentialStore {
        InMemoryCredentialStore::new("user1", "admin", "password123", 4).unwrap()
    }

    #[test]
    fn test_password_verification() {
        let store = create_test_store();

        // Correct password
        assert!(store.verify("admin", "password123"));

        // Incorrect password
        assert!(!store.verify("admin", "wrong"));
        assert!(!store.verify("admin", ""));

        // Non-existent user, even with the right password
        assert!(!store.verify("nonexistent", "password123"));
        assert!(!store.verify("Admin", "password123"));
    }

    #[test]
    fn test_digest_is_salted_bcrypt() {
        let store = create_test_store();
        let other = create_test_store();

        let digest = &store.identity.password_digest;
        assert!(digest.starts_with("$2"));
        assert_ne!(digest, "password123");
        assert_ne!(digest, &other.identity.password_digest);
    }

    #[test]
    fn test_find_identity() {
        let store = create_test_store();

        let identity = store.find("admin").unwrap();
        assert_eq!(identity.id, "user1");
        assert_eq!(identity.username, "admin");

        assert!(store.find("nobody").is_none());
    }

    #[test]
    fn test_corrupt_digest_never_matches() {
        let store = InMemoryCredentialStore::from_identity(Identity {
            id: "user1".to_string(),
            username: "admin".to_string(),
            password_digest: "not-a-bcrypt-digest".to_string(),
        });

        assert!(!store.verify("admin", "not-a-bcrypt-digest"));
    }

    #[test]
    fn test_invalid_cost_fails() {
        assert!(InMemoryCredentialStore::new("user1", "admin", "password123", 2).is_err());
    }
}
