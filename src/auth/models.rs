//! Authentication Models
//! Mission: Define identity, credential and token data structures

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The one known account, fixed at process start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub password_digest: String, // bcrypt digest - never serialize
}

/// Login request body
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Plaintext passwords must never reach the logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// JWT Claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // subject (identity id)
    pub username: String,
    pub iat: i64, // issued-at, unix seconds
    pub exp: i64, // expiration, unix seconds
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    pub fn subject(&self) -> Subject {
        Subject {
            id: self.sub.clone(),
            username: self.username.clone(),
        }
    }
}

/// Authenticated caller attached to admitted requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub username: String,
}

impl From<&Identity> for Subject {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.clone(),
            username: identity.username.clone(),
        }
    }
}

/// A freshly signed token and its lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64, // seconds until expiration
}

/// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            expires_in: issued.expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("admin", "password123");
        let rendered = format!("{:?}", creds);

        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("password123"));
    }

    #[test]
    fn test_credentials_missing_fields_default_to_empty() {
        let creds: Credentials = serde_json::from_str(r#"{"username":"admin"}"#).unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "");
    }

    #[test]
    fn test_login_response_is_camel_case() {
        let body = LoginResponse {
            token: "abc".to_string(),
            expires_in: 3600,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["token"], "abc");
        assert_eq!(json["expiresIn"], 3600);
    }

    #[test]
    fn test_claims_timestamps() {
        let claims = TokenClaims {
            sub: "user1".to_string(),
            username: "admin".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        };

        let expires = claims.expires_at().unwrap();
        assert_eq!(expires.timestamp(), 1_700_003_600);
        assert_eq!(expires.to_rfc3339(), "2023-11-14T23:13:20+00:00");
        assert_eq!(
            claims.subject(),
            Subject {
                id: "user1".to_string(),
                username: "admin".to_string()
            }
        );
    }
}
