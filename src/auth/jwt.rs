//! JWT Token Handler
//! Mission: Issue and verify signed, time-bounded bearer tokens

use crate::auth::{
    error::TokenError,
    models::{IssuedToken, Subject, TokenClaims},
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use std::time::Duration;
use tracing::debug;

/// JWT Handler for token operations
///
/// Holds the process signing key. Issuance and verification share the same
/// key and algorithm, so every handler built from one secret accepts the
/// tokens of every other.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler with secret key
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify_at` against the caller's clock, with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a token for `subject`, valid for `ttl` from now
    pub fn issue(&self, subject: &Subject, ttl: Duration) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    pub fn issue_at(
        &self,
        subject: &Subject,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let ttl_signed = chrono::Duration::from_std(ttl)
            .map_err(|e| TokenError::Encode(format!("Invalid token lifetime: {}", e)))?;
        let expiration = now
            .checked_add_signed(ttl_signed)
            .ok_or_else(|| TokenError::Encode("Invalid timestamp".to_string()))?;

        let claims = TokenClaims {
            sub: subject.id.clone(),
            username: subject.username.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        debug!(
            "Issuing JWT for {} ({}), expires in {}s",
            subject.username,
            subject.id,
            ttl.as_secs()
        );

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encode(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_in: ttl.as_secs(),
        })
    }

    /// Validate a JWT token and extract claims
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let decoded = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(classify)?;
        let claims = decoded.claims;

        if now.timestamp() >= claims.exp {
            debug!("Rejected expired JWT for {}", claims.username);
            return Err(TokenError::Expired);
        }

        debug!(
            "Validated JWT for {} (expires {})",
            claims.username,
            claims
                .expires_at()
                .map(|t| t.to_rfc3339())
                .unwrap_or_default()
        );
        Ok(claims)
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}
